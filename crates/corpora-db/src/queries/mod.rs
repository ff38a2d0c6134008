//! Database query implementations.

pub mod corpora;
pub mod texts;
