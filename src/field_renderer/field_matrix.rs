use std::{fmt, ops::Index};

use super::error::FieldError;

/// Integer cell codes for a whole field, addressed as (column, row) with row 0 at the bottom.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldMatrix {
    columns: usize,
    rows: usize,
    cells: Vec<i32>,
}

impl FieldMatrix {
    pub fn new(columns: usize, rows: usize) -> FieldMatrix {
        FieldMatrix {
            columns,
            rows,
            cells: vec![0; columns * rows],
        }
    }

    /// Builds a matrix out of column vectors, `columns[i][j]` landing at (i, j).
    pub fn from_columns(columns: Vec<Vec<i32>>) -> Result<FieldMatrix, FieldError> {
        let rows = columns.first().map_or(0, |col| col.len());
        if let Some((column, col)) = columns
            .iter()
            .enumerate()
            .find(|(_, col)| col.len() != rows)
        {
            return Err(FieldError::RaggedMatrix {
                column,
                expected: rows,
                found: col.len(),
            });
        }

        let mut matrix = FieldMatrix::new(columns.len(), rows);
        for (i, col) in columns.iter().enumerate() {
            for (j, &value) in col.iter().enumerate() {
                let idx = matrix.to_idx(i, j);
                matrix.cells[idx] = value;
            }
        }
        Ok(matrix)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn to_idx(&self, column: usize, row: usize) -> usize {
        row * self.columns + column
    }

    fn in_bounds(&self, column: usize, row: usize) -> bool {
        column < self.columns && row < self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> Option<i32> {
        if !self.in_bounds(column, row) {
            return None;
        }
        Some(self.cells[self.to_idx(column, row)])
    }

    pub fn set(&mut self, column: usize, row: usize, value: i32) -> bool {
        if !self.in_bounds(column, row) {
            return false;
        }
        let idx = self.to_idx(column, row);
        self.cells[idx] = value;
        true
    }

    pub fn fill(&mut self, value: i32) {
        self.cells.fill(value);
    }

    fn rows_iter(&self) -> impl DoubleEndedIterator<Item = &[i32]> + '_ {
        self.cells.chunks(self.columns.max(1))
    }
}

impl Index<(usize, usize)> for FieldMatrix {
    type Output = i32;

    fn index(&self, (column, row): (usize, usize)) -> &i32 {
        assert!(
            self.in_bounds(column, row),
            "cell ({}, {}) outside {}x{} field",
            column,
            row,
            self.columns,
            self.rows
        );
        &self.cells[self.to_idx(column, row)]
    }
}

impl fmt::Debug for FieldMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("Field({}x{})\n", self.columns, self.rows))?;
        for row in self.rows_iter().rev() {
            let r = row
                .iter()
                .map(|&value| match value {
                    0 => "..".to_string(),
                    v => format!("{:>2}", v),
                })
                .collect::<String>();
            f.write_str(r.as_str())?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}
