/// Errors raised while building or drawing a field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error(
        "field is {columns}x{rows} but the renderer was built for {expected_columns}x{expected_rows}"
    )]
    DimensionMismatch {
        expected_columns: usize,
        expected_rows: usize,
        columns: usize,
        rows: usize,
    },
    #[error("grid needs at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: usize, rows: usize },
    #[error("viewport has no usable world extent ({width} x {height})")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("cell margin must be a positive fraction, got {0}")]
    InvalidMargin(f32),
    #[error("column {column} has {found} cells, expected {expected}")]
    RaggedMatrix {
        column: usize,
        expected: usize,
        found: usize,
    },
}
