use crate::error::{Error, Result};
use crate::matrix::{DenseMatrix, Element, Matrix};
use crate::transform::{scale_rows, Transformer, TransformerConfig};
use crate::vocab::Vocabulary;
use crate::weight::IdfVector;

/// Reweights raw term counts by inverse document frequency.
///
/// A term that occurs in every document (like `the`) gets weight 0 and its
/// row is zeroed out, a term that occurs in few documents keeps most of its
/// count. `fit` learns `idf = ln((1 + n) / (1 + df))` per row, `transform`
/// multiplies each row by its weight.
///
/// The instance is `Unfitted` until the first `fit`. Every later `fit` throws
/// the previous weights away.
#[derive(Debug, Clone)]
pub struct TfidfTransformer<N = f64>
where
    N: Element,
{
    weights: Option<IdfVector<N>>,
    config: TransformerConfig,
}

impl<N> TfidfTransformer<N>
where
    N: Element,
{
    pub fn new() -> Self {
        Self::with_config(TransformerConfig::default())
    }

    pub fn with_config(config: TransformerConfig) -> Self {
        Self {
            weights: None,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    /// Weights from the latest `fit`, `None` while unfitted
    #[inline]
    pub fn weights(&self) -> Option<&IdfVector<N>> {
        self.weights.as_ref()
    }

    /// Weight of `term`, labeling rows with `vocab`.
    /// `None` when unfitted, when `term` is unknown, or when `vocab` does not
    /// have one entry per fitted row.
    pub fn weight_of(&self, vocab: &Vocabulary, term: &str) -> Option<N> {
        let idf = self.weights.as_ref()?;
        if vocab.len() != idf.len() {
            return None;
        }
        vocab.index_of(term).and_then(|row| idf.get(row))
    }
}

impl<N> Default for TfidfTransformer<N>
where
    N: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Transformer<N> for TfidfTransformer<N>
where
    N: Element,
{
    fn fit<M>(&mut self, matrix: &M) -> &mut Self
    where
        M: Matrix<N> + ?Sized,
    {
        let idf = IdfVector::fit(matrix);
        log::debug!(
            "fitted idf weights for {} terms over {} documents",
            idf.len(),
            idf.doc_num()
        );
        self.weights = Some(idf);
        self
    }

    fn transform<M>(&self, matrix: &M) -> Result<DenseMatrix<N>>
    where
        M: Matrix<N> + Sync + ?Sized,
    {
        let (rows, _) = matrix.dims();
        // 行数チェックは要素アクセスより先
        let idf = match &self.weights {
            Some(idf) if idf.len() == rows => idf,
            other => {
                let expected = other.as_ref().map(IdfVector::len);
                log::debug!("rejecting transform: fitted rows {expected:?}, got {rows}");
                return Err(Error::ShapeMismatch { expected, found: rows });
            }
        };
        let weights = idf.as_slice();
        Ok(scale_rows(matrix, &self.config, |i| weights[i]))
    }
}
