use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Ordered term list, term `i` labels row `i` of a term-document matrix.
///
/// The matrix itself stays positional; a vocabulary only exists so fitted
/// weights can be looked up by term.
/// Duplicate terms collapse onto their first position.
///
/// # Examples
/// ```
/// use tf_idf_transformer::Vocabulary;
/// let vocab = Vocabulary::from_terms(["cat", "dog", "cat"]);
/// assert_eq!(vocab.len(), 2);
/// assert_eq!(vocab.index_of("dog"), Some(1));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self {
            terms: IndexSet::new(),
        }
    }

    pub fn from_terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut vocab = Self::new();
        for term in terms {
            vocab.push(term.as_ref());
        }
        vocab
    }

    /// 追加して行番号を返す
    /// already known terms keep their original row
    #[inline]
    pub fn push(&mut self, term: &str) -> usize {
        match self.terms.get_index_of(term) {
            Some(row) => row,
            None => self.terms.insert_full(term.into()).0,
        }
    }

    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, row: usize) -> Option<&str> {
        self.terms.get_index(row).map(|t| &**t)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|t| &**t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_insertion_order() {
        let mut vocab = Vocabulary::from_terms(["the", "cat", "sat"]);
        assert_eq!(vocab.index_of("cat"), Some(1));
        assert_eq!(vocab.term(2), Some("sat"));
        assert_eq!(vocab.term(3), None);
        assert_eq!(vocab.index_of("dog"), None);

        assert_eq!(vocab.push("cat"), 1);
        assert_eq!(vocab.push("dog"), 3);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["the", "cat", "sat", "dog"]);
    }

    #[test]
    fn empty_vocabulary() {
        let vocab = Vocabulary::new();
        assert!(vocab.is_empty());
        assert_eq!(vocab, Vocabulary::default());
    }
}
