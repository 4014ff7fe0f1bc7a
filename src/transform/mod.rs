pub mod tf;
pub mod tfidf;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matrix::{DenseMatrix, Element, Matrix};

/// Weighting scheme over a term-document matrix (rows = terms, columns = documents).
///
/// `fit` learns per-term state from one matrix and `transform` applies it to any
/// matrix with the same number of rows. Implementors decide what is learned;
/// `TfidfTransformer` learns IDF weights, `TfTransformer` learns only the shape.
///
/// Document length (L2) normalization is not part of any scheme shipped here.
/// It would be added as another implementor, without touching callers.
pub trait Transformer<N>
where
    N: Element,
{
    /// Learn from `matrix`, replacing whatever was learned before.
    /// Never fails.
    fn fit<M>(&mut self, matrix: &M) -> &mut Self
    where
        M: Matrix<N> + ?Sized;

    /// Produce a newly allocated matrix of the same shape as `matrix`.
    ///
    /// `matrix` must be `Sync` since rows may be scaled on the rayon pool.
    ///
    /// # Errors
    /// `Error::ShapeMismatch` when unfitted or when the row count differs
    /// from the fitted one. Nothing is allocated in that case.
    fn transform<M>(&self, matrix: &M) -> Result<DenseMatrix<N>>
    where
        M: Matrix<N> + Sync + ?Sized;

    /// `fit(matrix)` followed by `transform(matrix)`
    fn fit_transform<M>(&mut self, matrix: &M) -> Result<DenseMatrix<N>>
    where
        M: Matrix<N> + Sync + ?Sized,
    {
        self.fit(matrix).transform(matrix)
    }
}

/// Tuning shared by the transformers. Only affects speed, never results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    /// Matrices with at least this many rows are scaled on the rayon pool
    pub parallel_min_rows: usize,
}

impl TransformerConfig {
    pub const DEFAULT_PARALLEL_MIN_ROWS: usize = 1024;

    /// Always run row-parallel
    pub fn parallel() -> Self {
        Self { parallel_min_rows: 0 }
    }

    /// Never use the rayon pool
    pub fn sequential() -> Self {
        Self { parallel_min_rows: usize::MAX }
    }

    #[inline]
    pub fn use_parallel(&self, rows: usize) -> bool {
        rows >= self.parallel_min_rows
    }
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            parallel_min_rows: Self::DEFAULT_PARALLEL_MIN_ROWS,
        }
    }
}

/// `output[i][j] = matrix[i][j] * weight(i)`
///
/// Rows are independent so they are split across rayon workers when the
/// config asks for it.
pub(crate) fn scale_rows<N, M, W>(
    matrix: &M,
    config: &TransformerConfig,
    weight: W,
) -> DenseMatrix<N>
where
    N: Element,
    M: Matrix<N> + Sync + ?Sized,
    W: Fn(usize) -> N + Sync,
{
    let (rows, cols) = matrix.dims();
    let mut output = DenseMatrix::zeros(rows, cols);

    let fill = |(i, row): (usize, &mut [N])| {
        let w = weight(i);
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = matrix.at(i, j) * w;
        }
    };

    if config.use_parallel(rows) {
        log::trace!("scaling {rows}x{cols} matrix on rayon pool");
        output.par_rows_mut().enumerate().for_each(fill);
    } else {
        log::trace!("scaling {rows}x{cols} matrix sequentially");
        output.rows_mut().enumerate().for_each(fill);
    }
    output
}
