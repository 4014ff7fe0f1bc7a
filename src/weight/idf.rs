use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::{Element, Matrix};
use crate::vocab::Vocabulary;

/// Fitted inverse document frequency weights, one per term (row).
///
/// `idf = ln((1 + n) / (1 + df))`
/// The `+1` on both sides keeps every weight finite and non-negative,
/// also for terms that never occur and for corpora with no documents.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdfVector<N> {
    /// IDF Vector it is not sparse because it is mostly filled
    idf_vec: Vec<N>,
    /// document count seen by fit
    doc_num: u64,
}

impl<N> IdfVector<N>
where
    N: Element,
{
    /// Count document frequencies per row of `matrix` and derive the weights.
    /// Never fails. `0 x n` gives an empty vector, `m x 0` gives `m` zeros.
    pub fn fit<M>(matrix: &M) -> Self
    where
        M: Matrix<N> + ?Sized,
    {
        let (terms, docs) = matrix.dims();
        let numerator = N::one() + count_as::<N>(docs);
        let idf_vec = (0..terms)
            .map(|i| {
                let df = document_frequency(matrix, i);
                (numerator / (N::one() + count_as::<N>(df))).ln()
            })
            .collect();
        Self {
            idf_vec,
            doc_num: docs as u64,
        }
    }

    /// `(term, weight)` pairs in row order.
    ///
    /// # Errors
    /// `Error::ShapeMismatch` when the vocabulary size differs from the weight count.
    pub fn labeled<'a>(
        &'a self,
        vocab: &'a Vocabulary,
    ) -> Result<impl Iterator<Item = (&'a str, N)> + 'a> {
        if vocab.len() != self.len() {
            return Err(Error::ShapeMismatch {
                expected: Some(self.len()),
                found: vocab.len(),
            });
        }
        Ok(vocab.iter().zip(self.idf_vec.iter().copied()))
    }
}

impl<N> IdfVector<N>
where
    N: Copy,
{
    #[inline]
    pub fn get(&self, term: usize) -> Option<N> {
        self.idf_vec.get(term).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.idf_vec
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    /// Number of documents (columns) the weights were fitted on
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }
}

/// Number of columns in `row` holding a nonzero value.
/// Only presence counts, not magnitude.
pub fn document_frequency<N, M>(matrix: &M, row: usize) -> usize
where
    N: Element,
    M: Matrix<N> + ?Sized,
{
    let (_, docs) = matrix.dims();
    (0..docs).filter(|&j| !matrix.at(row, j).is_zero()).count()
}

// f32/f64 always represent a usize (possibly rounded)
#[inline]
fn count_as<N: Element>(count: usize) -> N {
    <N as num::NumCast>::from(count).unwrap_or_else(N::max_value)
}
