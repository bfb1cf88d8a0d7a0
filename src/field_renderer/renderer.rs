use bevy::log::debug;

use super::{
    error::FieldError,
    field_matrix::FieldMatrix,
    host::{RenderHost, Viewport},
    layout::{FieldLayout, EDGE_MARGIN},
    palette::color_of,
};

/// A fixed grid of square visuals laid out over the viewport, one per cell.
/// The handles are created once and never resized, `draw` only recolors them.
#[derive(Clone)]
pub struct FieldRenderer<T> {
    layout: FieldLayout,
    // row * columns + column
    cells: Vec<T>,
}

impl<T> FieldRenderer<T> {
    pub fn create<H>(
        viewport: &impl Viewport,
        host: &mut H,
        columns: usize,
        rows: usize,
    ) -> Result<FieldRenderer<T>, FieldError>
    where
        H: RenderHost<Handle = T>,
    {
        Self::with_margin(viewport, host, columns, rows, EDGE_MARGIN)
    }

    pub fn with_margin<H>(
        viewport: &impl Viewport,
        host: &mut H,
        columns: usize,
        rows: usize,
        margin: f32,
    ) -> Result<FieldRenderer<T>, FieldError>
    where
        H: RenderHost<Handle = T>,
    {
        let layout = FieldLayout::fit(viewport, columns, rows, margin)?;

        let mut cells = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(host.create_square(layout.cell_center(column, row), layout.edge()));
            }
        }

        Ok(FieldRenderer { layout, cells })
    }

    pub fn columns(&self) -> usize {
        self.layout.columns()
    }
    pub fn rows(&self) -> usize {
        self.layout.rows()
    }
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    fn to_idx(&self, column: usize, row: usize) -> usize {
        row * self.columns() + column
    }

    pub fn handle(&self, column: usize, row: usize) -> Option<&T> {
        if column >= self.columns() || row >= self.rows() {
            return None;
        }
        self.cells.get(self.to_idx(column, row))
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = (usize, usize, &T)> + '_ {
        let columns = self.columns();
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, handle)| (idx % columns, idx / columns, handle))
    }

    pub fn draw<H>(&self, host: &mut H, field: &FieldMatrix) -> Result<(), FieldError>
    where
        H: RenderHost<Handle = T>,
    {
        if field.columns() != self.columns() || field.rows() != self.rows() {
            return Err(FieldError::DimensionMismatch {
                expected_columns: self.columns(),
                expected_rows: self.rows(),
                columns: field.columns(),
                rows: field.rows(),
            });
        }

        for (column, row, handle) in self.cells() {
            host.set_color(handle, color_of(field[(column, row)]));
        }
        Ok(())
    }

    pub fn destroy<H>(self, host: &mut H)
    where
        H: RenderHost<Handle = T>,
    {
        debug!("destroying {} field cells", self.cells.len());
        for handle in self.cells {
            host.destroy(handle);
        }
    }
}
