use bevy::{
    log::debug,
    math::{Vec2, Vec3},
};

use super::{error::FieldError, host::Viewport};

// keeps the grid off the screen edges
pub const EDGE_MARGIN: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLayout {
    columns: usize,
    rows: usize,
    edge: f32,
    origin: Vec3,
}

impl FieldLayout {
    /// Largest square cell that fits the grid both ways, shrunk by `margin`.
    pub fn fit(
        viewport: &impl Viewport,
        columns: usize,
        rows: usize,
        margin: f32,
    ) -> Result<FieldLayout, FieldError> {
        if columns == 0 || rows == 0 {
            return Err(FieldError::EmptyGrid { columns, rows });
        }
        if !(margin.is_finite() && margin > 0.) {
            return Err(FieldError::InvalidMargin(margin));
        }

        let min = viewport.screen_to_world(Vec2::ZERO);
        let max = viewport.screen_to_world(viewport.viewport_size());
        let width = max.x - min.x;
        let height = max.y - min.y;
        if !(width.is_finite() && height.is_finite() && width > 0. && height > 0.) {
            return Err(FieldError::DegenerateViewport { width, height });
        }

        let max_edge_x = width / columns as f32;
        let max_edge_y = height / rows as f32;
        let edge = max_edge_x.min(max_edge_y) * margin;
        let origin = Vec3::new(min.x, min.y, 0.);

        debug!(
            "field layout {}x{} in {}x{} world units: edge {}, origin {}",
            columns, rows, width, height, edge, origin
        );

        Ok(FieldLayout {
            columns,
            rows,
            edge,
            origin,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn edge(&self) -> f32 {
        self.edge
    }
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    // sprites pivot on their center
    pub fn cell_center(&self, column: usize, row: usize) -> Vec3 {
        let half = self.edge / 2.;
        self.origin
            + Vec3::new(
                column as f32 * self.edge + half,
                row as f32 * self.edge + half,
                0.,
            )
    }
}

#[cfg(test)]
pub(crate) mod test {
    use bevy::math::{Vec2, Vec3};

    use super::{FieldLayout, EDGE_MARGIN};
    use crate::field_renderer::{error::FieldError, host::Viewport};

    // screen bottom left sits at `origin`
    pub struct FlatViewport {
        pub pixels: Vec2,
        pub world: Vec2,
        pub origin: Vec3,
    }

    impl Viewport for FlatViewport {
        fn viewport_size(&self) -> Vec2 {
            self.pixels
        }
        fn screen_to_world(&self, screen: Vec2) -> Vec3 {
            let scaled = screen / self.pixels * self.world;
            self.origin + scaled.extend(7.)
        }
    }

    pub fn viewport(world_width: f32, world_height: f32) -> FlatViewport {
        FlatViewport {
            pixels: Vec2::new(world_width * 100., world_height * 100.),
            world: Vec2::new(world_width, world_height),
            origin: Vec3::new(-world_width / 2., -world_height / 2., 0.),
        }
    }

    #[test]
    fn edge_fits_the_tighter_axis() {
        let vp = viewport(9., 4.);
        let layout = FieldLayout::fit(&vp, 3, 2, EDGE_MARGIN).unwrap();
        assert!((layout.edge() - 1.9).abs() < 1e-5, "{}", layout.edge());
        assert_eq!(layout.origin(), Vec3::new(-4.5, -2., 0.));

        let tall = FieldLayout::fit(&viewport(4., 9.), 2, 3, 1.).unwrap();
        assert!((tall.edge() - 2.).abs() < 1e-5);
    }

    #[test]
    fn cell_centers() {
        let vp = viewport(9., 4.);
        let layout = FieldLayout::fit(&vp, 3, 2, EDGE_MARGIN).unwrap();
        let origin = layout.origin();

        assert!(layout
            .cell_center(0, 0)
            .abs_diff_eq(origin + Vec3::new(0.95, 0.95, 0.), 1e-5));
        assert!(layout
            .cell_center(2, 1)
            .abs_diff_eq(origin + Vec3::new(2. * 1.9 + 0.95, 1.9 + 0.95, 0.), 1e-5));
        // the grid is flat whatever depth the viewport reports
        assert_eq!(layout.cell_center(1, 1).z, 0.);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let vp = viewport(9., 4.);
        assert_eq!(
            FieldLayout::fit(&vp, 0, 2, EDGE_MARGIN),
            Err(FieldError::EmptyGrid {
                columns: 0,
                rows: 2
            })
        );
    }

    #[test]
    fn margin_must_be_positive() {
        let vp = viewport(9., 4.);
        for margin in [0., -0.5, f32::NAN] {
            assert!(matches!(
                FieldLayout::fit(&vp, 3, 2, margin),
                Err(FieldError::InvalidMargin(_))
            ));
        }
        assert!(FieldLayout::fit(&vp, 3, 2, 1.).is_ok());
    }

    #[test]
    fn degenerate_viewport_is_rejected() {
        let flat = FlatViewport {
            pixels: Vec2::new(800., 600.),
            world: Vec2::new(10., 0.),
            origin: Vec3::ZERO,
        };
        assert!(matches!(
            FieldLayout::fit(&flat, 3, 2, EDGE_MARGIN),
            Err(FieldError::DegenerateViewport { .. })
        ));

        let no_window = FlatViewport {
            pixels: Vec2::ZERO,
            world: Vec2::new(10., 10.),
            origin: Vec3::ZERO,
        };
        assert!(matches!(
            FieldLayout::fit(&no_window, 3, 2, EDGE_MARGIN),
            Err(FieldError::DegenerateViewport { .. })
        ));
    }
}
