//! Corpus operations.

pub mod model;

use corpora_db::queries::{corpora as queries, texts as text_queries};
use corpora_db::DbPool;
use model::{Corpus, CorpusPatch, NewCorpus};
use tracing::debug;

use crate::error::{CorporaError, CorporaResult};
use crate::text::model::Text;

/// Get a corpus by ID, including its texts.
pub fn get_corpus(pool: &DbPool, id: i64) -> CorporaResult<Corpus> {
    let row = queries::get_corpus(pool, id)
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::CorpusNotFound(id)))?;
    let texts = text_queries::list_texts_for_corpus(pool, id)?
        .into_iter()
        .map(Text::from_row)
        .collect();
    Ok(Corpus::from_row(row, texts))
}

/// List all corpora with their texts.
pub fn list_corpora(pool: &DbPool) -> CorporaResult<Vec<Corpus>> {
    let rows = queries::list_corpora(pool)?;
    let mut corpora = Vec::with_capacity(rows.len());
    for row in rows {
        let texts = text_queries::list_texts_for_corpus(pool, row.id)?
            .into_iter()
            .map(Text::from_row)
            .collect();
        corpora.push(Corpus::from_row(row, texts));
    }
    Ok(corpora)
}

/// Create a corpus.
pub fn create_corpus(pool: &DbPool, new: &NewCorpus) -> CorporaResult<Corpus> {
    let id = queries::create_corpus(pool, &new.title, new.description.as_deref(), &new.genre)?;
    debug!(id, title = %new.title, "Corpus created");
    get_corpus(pool, id)
}

/// Apply a partial update to a corpus.
pub fn update_corpus(pool: &DbPool, id: i64, patch: &CorpusPatch) -> CorporaResult<Corpus> {
    let mut row = queries::get_corpus(pool, id)
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::CorpusNotFound(id)))?;

    if let Some(title) = &patch.title {
        row.title = title.clone();
    }
    if let Some(description) = &patch.description {
        row.description = Some(description.clone());
    }
    if let Some(genre) = &patch.genre {
        row.genre = genre.clone();
    }

    queries::update_corpus(pool, &row)?;
    get_corpus(pool, id)
}

/// Delete a corpus (and, by cascade, its texts). Returns the deleted id.
pub fn delete_corpus(pool: &DbPool, id: i64) -> CorporaResult<i64> {
    queries::delete_corpus(pool, id)
        .map_err(|e| CorporaError::or_not_found(e, CorporaError::CorpusNotFound(id)))?;
    debug!(id, "Corpus deleted");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{self, model::NewText};
    use corpora_db::migrations::run_migrations;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    #[test]
    fn test_create_defaults_missing_fields() {
        let pool = pool();
        let corpus = create_corpus(&pool, &NewCorpus::default()).unwrap();
        assert_eq!(corpus.title, "");
        assert_eq!(corpus.genre, "");
        assert!(corpus.texts.is_empty());
    }

    #[test]
    fn test_get_includes_texts() {
        let pool = pool();
        let corpus = create_corpus(
            &pool,
            &NewCorpus {
                title: "Fables".to_string(),
                genre: "fable".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        text::create_text(
            &pool,
            &NewText {
                title: "The Fox".to_string(),
                content: "A fox saw grapes".to_string(),
                corpus: Some(corpus.id),
                ..Default::default()
            },
        )
        .unwrap();

        let loaded = get_corpus(&pool, corpus.id).unwrap();
        assert_eq!(loaded.texts.len(), 1);
        assert_eq!(loaded.texts[0].title, "The Fox");
    }

    #[test]
    fn test_update_merges() {
        let pool = pool();
        let corpus = create_corpus(
            &pool,
            &NewCorpus {
                title: "Old".to_string(),
                genre: "lyric".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let patch = CorpusPatch {
            description: Some("Now described".to_string()),
            ..Default::default()
        };
        let updated = update_corpus(&pool, corpus.id, &patch).unwrap();

        assert_eq!(updated.title, "Old");
        assert_eq!(updated.genre, "lyric");
        assert_eq!(updated.description.as_deref(), Some("Now described"));
    }

    #[test]
    fn test_missing_corpus() {
        let pool = pool();
        assert!(matches!(get_corpus(&pool, 3), Err(CorporaError::CorpusNotFound(3))));
        assert!(matches!(delete_corpus(&pool, 3), Err(CorporaError::CorpusNotFound(3))));
    }
}
