//! Corpora Core Library
//!
//! Domain models and operations for the relational side of Corpora:
//! corpora and the texts they own.

pub mod corpus;
pub mod error;
pub mod text;

pub use error::{CorporaError, CorporaResult};
