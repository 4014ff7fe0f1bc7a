use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The transformer is unfitted (`expected == None`) or was fitted on a
    /// different number of terms than the matrix carries.
    #[error("shape mismatch: {}", describe_rows(.expected, .found))]
    ShapeMismatch {
        expected: Option<usize>,
        found: usize,
    },
    /// A flat buffer cannot back the requested matrix shape.
    #[error("buffer of length {len} cannot back a {rows}x{cols} matrix")]
    InvalidBuffer {
        rows: usize,
        cols: usize,
        len: usize,
    },
    /// Row-wise construction got rows of differing lengths.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Error {
    #[inline]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Error::ShapeMismatch { .. })
    }
}

fn describe_rows(expected: &Option<usize>, found: &usize) -> String {
    match expected {
        Some(rows) => format!("fitted on {rows} terms, matrix has {found} rows"),
        None => format!("transformer is not fitted (matrix has {found} rows)"),
    }
}
