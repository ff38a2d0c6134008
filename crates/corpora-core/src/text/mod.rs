//! Text operations.

pub mod model;

use corpora_db::queries::{corpora as corpus_queries, texts as queries};
use corpora_db::DbPool;
use model::{NewText, Text, TextPatch};
use tracing::debug;

use crate::error::{CorporaError, CorporaResult};

/// Get a text by ID.
pub fn get_text(pool: &DbPool, id: i64) -> CorporaResult<Text> {
    let row = queries::get_text(pool, id)
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::TextNotFound(id)))?;
    Ok(Text::from_row(row))
}

/// Create a text inside an existing corpus.
pub fn create_text(pool: &DbPool, new: &NewText) -> CorporaResult<Text> {
    let corpus_id = new
        .corpus
        .ok_or_else(|| CorporaError::validation("a text must belong to a corpus"))?;
    ensure_corpus(pool, corpus_id)?;
    if let Some(translation_id) = new.has_translation {
        ensure_text(pool, translation_id)?;
    }

    let id = queries::create_text(
        pool,
        &new.title,
        new.description.as_deref(),
        &new.content,
        corpus_id,
        new.has_translation,
    )?;
    debug!(id, corpus_id, "Text created");

    get_text(pool, id)
}

/// Apply a partial update to a text.
pub fn update_text(pool: &DbPool, id: i64, patch: &TextPatch) -> CorporaResult<Text> {
    let mut row = queries::get_text(pool, id)
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::TextNotFound(id)))?;

    if let Some(title) = &patch.title {
        row.title = title.clone();
    }
    if let Some(description) = &patch.description {
        row.description = Some(description.clone());
    }
    if let Some(content) = &patch.content {
        row.content = content.clone();
    }
    if let Some(corpus_id) = patch.corpus {
        ensure_corpus(pool, corpus_id)?;
        row.corpus_id = corpus_id;
    }
    if let Some(translation_id) = patch.has_translation {
        if translation_id == id {
            return Err(CorporaError::validation("a text cannot be its own translation"));
        }
        ensure_text(pool, translation_id)?;
        row.has_translation_id = Some(translation_id);
    }

    queries::update_text(pool, &row)?;
    Ok(Text::from_row(row))
}

/// Delete a text and return its id.
pub fn delete_text(pool: &DbPool, id: i64) -> CorporaResult<i64> {
    queries::delete_text(pool, id)
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::TextNotFound(id)))?;
    debug!(id, "Text deleted");
    Ok(id)
}

fn ensure_corpus(pool: &DbPool, id: i64) -> CorporaResult<()> {
    corpus_queries::get_corpus(pool, id)
        .map(|_| ())
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::CorpusNotFound(id)))
}

fn ensure_text(pool: &DbPool, id: i64) -> CorporaResult<()> {
    queries::get_text(pool, id)
        .map(|_| ())
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::TextNotFound(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{self, model::NewCorpus};
    use corpora_db::migrations::run_migrations;

    fn setup() -> (DbPool, i64) {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        let corpus = corpus::create_corpus(
            &pool,
            &NewCorpus {
                title: "Sagas".to_string(),
                genre: "epic".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        (pool, corpus.id)
    }

    fn new_text(corpus: i64, title: &str) -> NewText {
        NewText {
            title: title.to_string(),
            content: "Once upon a time".to_string(),
            corpus: Some(corpus),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_requires_corpus() {
        let (pool, _) = setup();
        let err = create_text(&pool, &NewText::default()).unwrap_err();
        assert!(matches!(err, CorporaError::ValidationError(_)));
    }

    #[test]
    fn test_create_with_unknown_corpus() {
        let (pool, _) = setup();
        let err = create_text(&pool, &new_text(404, "Lost")).unwrap_err();
        assert!(matches!(err, CorporaError::CorpusNotFound(404)));
    }

    #[test]
    fn test_create_with_translation_link() {
        let (pool, corpus_id) = setup();
        let original = create_text(&pool, &new_text(corpus_id, "Original")).unwrap();

        let mut translated = new_text(corpus_id, "Translated");
        translated.has_translation = Some(original.id);
        let translated = create_text(&pool, &translated).unwrap();

        assert_eq!(translated.has_translation_id, Some(original.id));
    }

    #[test]
    fn test_update_keeps_untouched_fields() {
        let (pool, corpus_id) = setup();
        let text = create_text(&pool, &new_text(corpus_id, "Before")).unwrap();

        let patch = TextPatch {
            title: Some("After".to_string()),
            ..Default::default()
        };
        let updated = update_text(&pool, text.id, &patch).unwrap();

        assert_eq!(updated.title, "After");
        assert_eq!(updated.content, "Once upon a time");
    }

    #[test]
    fn test_self_translation_is_rejected() {
        let (pool, corpus_id) = setup();
        let text = create_text(&pool, &new_text(corpus_id, "Loop")).unwrap();

        let patch = TextPatch {
            has_translation: Some(text.id),
            ..Default::default()
        };
        assert!(update_text(&pool, text.id, &patch).is_err());
    }

    #[test]
    fn test_delete_missing() {
        let (pool, _) = setup();
        let err = delete_text(&pool, 5).unwrap_err();
        assert!(err.is_not_found());
    }
}
