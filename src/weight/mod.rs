pub mod idf;

pub use idf::{document_frequency, IdfVector};
