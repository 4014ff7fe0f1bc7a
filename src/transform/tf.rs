use crate::error::{Error, Result};
use crate::matrix::{DenseMatrix, Element, Matrix};
use crate::transform::{scale_rows, Transformer, TransformerConfig};

/// Raw term frequency: every term keeps weight 1.
///
/// Learns nothing but the number of terms, so it follows the same
/// fit-before-transform contract as `TfidfTransformer` and can stand in for
/// it wherever a `Transformer` is expected.
#[derive(Debug, Clone, Default)]
pub struct TfTransformer {
    terms: Option<usize>,
    config: TransformerConfig,
}

impl TfTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransformerConfig) -> Self {
        Self {
            terms: None,
            config,
        }
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.terms.is_some()
    }
}

impl<N> Transformer<N> for TfTransformer
where
    N: Element,
{
    fn fit<M>(&mut self, matrix: &M) -> &mut Self
    where
        M: Matrix<N> + ?Sized,
    {
        let (terms, _) = matrix.dims();
        log::debug!("fitted raw tf for {terms} terms");
        self.terms = Some(terms);
        self
    }

    fn transform<M>(&self, matrix: &M) -> Result<DenseMatrix<N>>
    where
        M: Matrix<N> + Sync + ?Sized,
    {
        let (rows, _) = matrix.dims();
        if self.terms != Some(rows) {
            log::debug!("rejecting transform: fitted rows {:?}, got {rows}", self.terms);
            return Err(Error::ShapeMismatch {
                expected: self.terms,
                found: rows,
            });
        }
        Ok(scale_rows(matrix, &self.config, |_| N::one()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::tfidf::TfidfTransformer;

    fn counts() -> Vec<Vec<f64>> {
        vec![vec![1.0, 0.0, 2.0], vec![1.0, 1.0, 1.0]]
    }

    #[test]
    fn keeps_raw_counts() {
        let mut tf = TfTransformer::new();
        let out = tf.fit_transform(&counts()).unwrap();
        assert_eq!(out, DenseMatrix::from_rows(counts()).unwrap());
        assert!(tf.is_fitted());
    }

    #[test]
    fn same_contract_as_tfidf() {
        let tf = TfTransformer::new();
        let err = Transformer::<f64>::transform(&tf, &counts()).unwrap_err();
        assert_eq!(err, Error::ShapeMismatch { expected: None, found: 2 });

        let mut tf = TfTransformer::with_config(TransformerConfig::parallel());
        Transformer::<f64>::fit(&mut tf, &counts());
        let err = tf.transform(&DenseMatrix::<f64>::zeros(1, 3)).unwrap_err();
        assert_eq!(err, Error::ShapeMismatch { expected: Some(2), found: 1 });
    }

    // callers only see the trait
    fn weigh<T: Transformer<f64>>(scheme: &mut T, m: &Vec<Vec<f64>>) -> DenseMatrix<f64> {
        scheme.fit_transform(m).unwrap()
    }

    #[test]
    fn schemes_are_interchangeable() {
        let raw = weigh(&mut TfTransformer::new(), &counts());
        let weighted = weigh(&mut TfidfTransformer::new(), &counts());
        assert_eq!(raw.dims(), weighted.dims());
        assert_eq!(raw.row(1), &[1.0, 1.0, 1.0]);
        assert_eq!(weighted.row(1), &[0.0, 0.0, 0.0]);
    }
}
