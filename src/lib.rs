//! TF-IDF reweighting of term-document count matrices.
//!
//! Rows are terms, columns are documents, cells are raw counts. Building that
//! matrix from text is left to the caller.
//!
//! # Examples
//! ```
//! use tf_idf_transformer::{DenseMatrix, Matrix, TfidfTransformer, Transformer};
//!
//! // cat = [1, 0, 2], dog = [1, 1, 1] over three documents
//! let counts = DenseMatrix::from_rows(vec![vec![1.0f64, 0.0, 2.0], vec![1.0, 1.0, 1.0]])?;
//! let mut tfidf = TfidfTransformer::new();
//! let weighted = tfidf.fit_transform(&counts)?;
//!
//! assert!((weighted.at(0, 2) - 2.0 * (4.0f64 / 3.0).ln()).abs() < 1e-12);
//! // dog is in every document
//! assert_eq!(weighted.row(1), &[0.0, 0.0, 0.0]);
//! # Ok::<(), tf_idf_transformer::Error>(())
//! ```
pub mod error;
pub mod matrix;
pub mod transform;
pub mod vocab;
pub mod weight;

pub use error::{Error, Result};

/// Matrix contracts and the dense container
/// - `Matrix`: read access (`dims`, `at`), what `fit` and `transform` consume
/// - `MatrixMut`: elementwise write access
/// - `DenseMatrix`: row-major storage returned by every transform
/// - `Element`: supported element types (`f32`, `f64`)
pub use matrix::{DenseMatrix, Element, Matrix, MatrixMut};

/// Weighting schemes
/// `Transformer` is the common `fit` / `transform` / `fit_transform` interface.
/// - `TfidfTransformer`: inverse document frequency weighting
/// - `TfTransformer`: raw term frequency, weights every term with 1
///
/// `TransformerConfig` controls when rows are scaled in parallel.
pub use transform::{tf::TfTransformer, tfidf::TfidfTransformer, Transformer, TransformerConfig};

/// Fitted IDF weights
/// Serializable, so a caller can persist them however it likes.
pub use weight::IdfVector;

/// Term labels for matrix rows
pub use vocab::Vocabulary;
