use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Element type accepted by the transformers.
/// `f32` and `f64` are supported.
pub trait Element: Float + Send + Sync + std::fmt::Debug + 'static {}
impl Element for f32 {}
impl Element for f64 {}

/// Read access to a 2-D numeric container.
/// rows = terms, columns = documents
///
/// `at` may panic on out-of-range indices, the same way slice indexing does.
/// `fit` accepts any implementor; `transform` additionally needs `Sync`
/// because rows may be read from the rayon pool.
pub trait Matrix<N> {
    /// `(rows, cols)`
    fn dims(&self) -> (usize, usize);
    fn at(&self, i: usize, j: usize) -> N;
}

/// Elementwise write access.
pub trait MatrixMut<N>: Matrix<N> {
    fn set(&mut self, i: usize, j: usize, value: N);
}

impl<N, M> Matrix<N> for &M
where
    M: Matrix<N> + ?Sized,
{
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (**self).dims()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> N {
        (**self).at(i, j)
    }
}

/// Nested rows. The column count is taken from the first row,
/// so the rows are expected to be rectangular.
impl<N> Matrix<N> for Vec<Vec<N>>
where
    N: Copy,
{
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.len(), self.first().map_or(0, Vec::len))
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> N {
        self[i][j]
    }
}

/// Dense row-major matrix.
/// Returned by every transform, the caller owns it outright.
///
/// Deserialization goes through `from_vec`, so a shape that does not match
/// the buffer is rejected instead of panicking on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDense<N>")]
pub struct DenseMatrix<N> {
    rows: usize,
    cols: usize,
    data: Vec<N>,
}

/// unchecked wire form of `DenseMatrix`
#[derive(Deserialize)]
struct RawDense<N> {
    rows: usize,
    cols: usize,
    data: Vec<N>,
}

impl<N> TryFrom<RawDense<N>> for DenseMatrix<N> {
    type Error = Error;

    fn try_from(raw: RawDense<N>) -> Result<Self> {
        Self::from_vec(raw.rows, raw.cols, raw.data)
    }
}

#[inline]
fn checked_len(rows: usize, cols: usize) -> usize {
    rows.checked_mul(cols).unwrap_or_else(|| panic!("{rows}x{cols} matrix overflows usize"))
}

impl<N> DenseMatrix<N>
where
    N: Copy + num::Zero,
{
    /// All-zero matrix of the given shape
    ///
    /// # Panics
    /// if `rows * cols` overflows `usize`
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![N::zero(); checked_len(rows, cols)],
        }
    }

    /// Build from nested rows. An empty outer vector gives a `0x0` matrix.
    ///
    /// # Errors
    /// `Error::RaggedRows` when a row length differs from the first row.
    pub fn from_rows(rows: Vec<Vec<N>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedRows { row, expected: cols, found: values.len() });
            }
            data.extend_from_slice(values);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    /// Copy any `Matrix` into dense storage
    ///
    /// # Panics
    /// if the reported `rows * cols` overflows `usize`
    pub fn from_matrix<M>(matrix: &M) -> Self
    where
        M: Matrix<N> + ?Sized,
    {
        let (rows, cols) = matrix.dims();
        let mut data = Vec::with_capacity(checked_len(rows, cols));
        for i in 0..rows {
            data.extend((0..cols).map(|j| matrix.at(i, j)));
        }
        Self { rows, cols, data }
    }
}

impl<N> DenseMatrix<N> {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    /// `Error::InvalidBuffer` when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<N>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::InvalidBuffer { rows, cols, len: data.len() });
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// # Panics
    /// if `i >= rows`
    #[inline]
    pub fn row(&self, i: usize) -> &[N] {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// # Panics
    /// if `i >= rows`
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [N] {
        assert!(i < self.rows, "row {i} out of range for {} rows", self.rows);
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<N> {
        self.data
    }

    // cols == 0 のとき chunk サイズ 0 は panic するので 1 に丸める
    // (data が空なので何も返らない)
    #[inline]
    pub(crate) fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, N> {
        let width = self.cols.max(1);
        self.data.chunks_mut(width)
    }

    #[inline]
    pub(crate) fn par_rows_mut(&mut self) -> rayon::slice::ChunksMut<'_, N>
    where
        N: Send,
    {
        let width = self.cols.max(1);
        self.data.par_chunks_mut(width)
    }
}

impl<N> Matrix<N> for DenseMatrix<N>
where
    N: Copy,
{
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> N {
        assert!(j < self.cols, "column {j} out of range for {} columns", self.cols);
        self.data[i * self.cols + j]
    }
}

impl<N> MatrixMut<N> for DenseMatrix<N>
where
    N: Copy,
{
    #[inline]
    fn set(&mut self, i: usize, j: usize, value: N) {
        assert!(j < self.cols, "column {j} out of range for {} columns", self.cols);
        self.data[i * self.cols + j] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_is_row_major() {
        let m = DenseMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.dims(), (2, 3));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.at(0, 2), 3.0);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = DenseMatrix::from_rows(vec![vec![1.0f64, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, Error::RaggedRows { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn from_rows_empty_is_zero_by_zero() {
        let m = DenseMatrix::<f64>::from_rows(Vec::new()).unwrap();
        assert_eq!(m.dims(), (0, 0));
        assert!(m.as_slice().is_empty());
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(DenseMatrix::from_vec(2, 2, vec![0.0f32; 4]).is_ok());
        let err = DenseMatrix::from_vec(2, 2, vec![0.0f32; 3]).unwrap_err();
        assert_eq!(err, Error::InvalidBuffer { rows: 2, cols: 2, len: 3 });
    }

    #[test]
    fn degenerate_shapes_are_allowed() {
        let tall = DenseMatrix::<f64>::zeros(3, 0);
        assert_eq!(tall.dims(), (3, 0));
        assert!(tall.row(2).is_empty());

        let wide = DenseMatrix::<f64>::from_vec(0, 4, Vec::new()).unwrap();
        assert_eq!(wide.dims(), (0, 4));
    }

    #[test]
    fn set_and_row_mut_write_through() {
        let mut m = DenseMatrix::<f64>::zeros(2, 2);
        m.set(0, 1, 7.0);
        m.row_mut(1)[0] = 3.0;
        assert_eq!(m.into_vec(), vec![0.0, 7.0, 3.0, 0.0]);
    }

    #[test]
    fn nested_vec_and_references_are_matrices() {
        let nested = vec![vec![1.0f64, 0.0], vec![2.0, 5.0], vec![0.0, 0.0]];
        assert_eq!(nested.dims(), (3, 2));
        assert_eq!(nested.at(1, 1), 5.0);

        let by_ref = &nested;
        assert_eq!(Matrix::<f64>::dims(&by_ref), (3, 2));

        let dense = DenseMatrix::from_matrix(&nested);
        assert_eq!(dense.row(1), &[2.0, 5.0]);
        assert_eq!(Vec::<Vec<f64>>::new().dims(), (0, 0));
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn zeros_rejects_overflowing_shape() {
        let _ = DenseMatrix::<f64>::zeros(usize::MAX, 2);
    }

    // a matrix that claims more cells than it can address
    struct Huge;
    impl Matrix<f64> for Huge {
        fn dims(&self) -> (usize, usize) {
            (usize::MAX / 2 + 1, 2)
        }
        fn at(&self, _: usize, _: usize) -> f64 {
            0.0
        }
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn from_matrix_rejects_overflowing_shape() {
        let _ = DenseMatrix::from_matrix(&Huge);
    }

    fn cbor_matrix(rows: i128, cols: i128, data: &[f64]) -> Vec<u8> {
        use serde_cbor::Value;
        let mut fields = std::collections::BTreeMap::new();
        fields.insert(Value::Text("rows".into()), Value::Integer(rows));
        fields.insert(Value::Text("cols".into()), Value::Integer(cols));
        let cells = data.iter().map(|&v| Value::Float(v)).collect();
        fields.insert(Value::Text("data".into()), Value::Array(cells));
        serde_cbor::to_vec(&Value::Map(fields)).unwrap()
    }

    #[test]
    fn deserialize_checks_shape_against_buffer() {
        let good = DenseMatrix::from_vec(1, 2, vec![1.0, 3.0]).unwrap();
        let bytes = serde_cbor::to_vec(&good).unwrap();
        assert_eq!(serde_cbor::from_slice::<DenseMatrix<f64>>(&bytes).unwrap(), good);
        assert_eq!(
            serde_cbor::from_slice::<DenseMatrix<f64>>(&cbor_matrix(1, 2, &[1.0, 3.0])).unwrap(),
            good
        );

        let bad = cbor_matrix(2, 3, &[1.0]);
        let err = serde_cbor::from_slice::<DenseMatrix<f64>>(&bad).unwrap_err();
        assert!(err.to_string().contains("cannot back a 2x3 matrix"), "{err}");
    }

    #[test]
    fn rows_mut_skips_empty_columns() {
        let mut m = DenseMatrix::<f64>::zeros(4, 0);
        assert_eq!(m.rows_mut().count(), 0);
    }
}
