//! Corpus model types.

use corpora_db::queries::corpora::CorpusRow;
use serde::{Deserialize, Serialize};

use crate::text::model::Text;

/// A corpus together with the texts it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub genre: String,
    pub texts: Vec<Text>,
}

impl Corpus {
    /// Create from database row and the corpus' text rows.
    pub fn from_row(row: CorpusRow, texts: Vec<Text>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: row.genre,
            texts,
        }
    }
}

/// Fields accepted when creating a corpus. Missing strings default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCorpus {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: String,
}

/// Partial update of a corpus; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
}
