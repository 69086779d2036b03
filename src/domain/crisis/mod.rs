//! Crisis detection: lexical classifier and its maintained phrase lists.

pub mod classifier;
pub mod lexicon;

pub use classifier::{classify, CrisisAssessment, CrisisSeverity};
pub use lexicon::CRISIS_ANNOTATION;
