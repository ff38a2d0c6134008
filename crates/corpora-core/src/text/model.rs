//! Text model types.

use corpora_db::queries::texts::TextRow;
use serde::{Deserialize, Serialize};

/// A text belonging to a corpus, optionally linked to its translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub corpus_id: i64,
    #[serde(rename = "has_translation")]
    pub has_translation_id: Option<i64>,
}

impl Text {
    /// Create from database row.
    pub fn from_row(row: TextRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            corpus_id: row.corpus_id,
            has_translation_id: row.has_translation_id,
        }
    }
}

/// Fields accepted when creating a text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewText {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    pub corpus: Option<i64>,
    pub has_translation: Option<i64>,
}

/// Partial update of a text; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub corpus: Option<i64>,
    pub has_translation: Option<i64>,
}
