//! Text queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Text row from database.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub corpus_id: i64,
    pub has_translation_id: Option<i64>,
}

const TEXT_COLUMNS: &str = "id, title, description, content, corpus_id, has_translation_id";

fn map_text(row: &rusqlite::Row<'_>) -> rusqlite::Result<TextRow> {
    Ok(TextRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        content: row.get(3)?,
        corpus_id: row.get(4)?,
        has_translation_id: row.get(5)?,
    })
}

/// Insert a text and return its id.
pub fn create_text(
    pool: &DbPool,
    title: &str,
    description: Option<&str>,
    content: &str,
    corpus_id: i64,
    has_translation_id: Option<i64>,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO text (title, description, content, corpus_id, has_translation_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![title, description, content, corpus_id, has_translation_id],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Get a text by ID.
pub fn get_text(pool: &DbPool, id: i64) -> DbResult<TextRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {} FROM text WHERE id = ?1", TEXT_COLUMNS),
            params![id],
            map_text,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Text: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List the texts of a corpus ordered by id.
pub fn list_texts_for_corpus(pool: &DbPool, corpus_id: i64) -> DbResult<Vec<TextRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM text WHERE corpus_id = ?1 ORDER BY id",
            TEXT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![corpus_id], map_text)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Overwrite every column of an existing text.
pub fn update_text(pool: &DbPool, row: &TextRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE text
             SET title = ?2, description = ?3, content = ?4, corpus_id = ?5, has_translation_id = ?6
             WHERE id = ?1",
            params![
                row.id,
                row.title,
                row.description,
                row.content,
                row.corpus_id,
                row.has_translation_id
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Text: {}", row.id)));
        }
        Ok(())
    })
}

/// Delete a text. Texts pointing at it as their translation keep living
/// with `has_translation_id` cleared (ON DELETE SET NULL).
pub fn delete_text(pool: &DbPool, id: i64) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM text WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Text: {}", id)));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use crate::queries::corpora;

    fn pool_with_corpus() -> (DbPool, i64) {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        let corpus_id = corpora::create_corpus(&pool, "Letters", None, "epistolary").unwrap();
        (pool, corpus_id)
    }

    #[test]
    fn test_create_and_get() {
        let (pool, corpus_id) = pool_with_corpus();
        let id = create_text(&pool, "First", None, "Dear friend", corpus_id, None).unwrap();

        let row = get_text(&pool, id).unwrap();
        assert_eq!(row.content, "Dear friend");
        assert_eq!(row.corpus_id, corpus_id);
        assert_eq!(row.has_translation_id, None);
    }

    #[test]
    fn test_unknown_corpus_is_rejected() {
        let (pool, _) = pool_with_corpus();
        assert!(create_text(&pool, "Orphan", None, "...", 999, None).is_err());
    }

    #[test]
    fn test_corpus_delete_cascades() {
        let (pool, corpus_id) = pool_with_corpus();
        let id = create_text(&pool, "First", None, "body", corpus_id, None).unwrap();

        corpora::delete_corpus(&pool, corpus_id).unwrap();

        assert!(matches!(get_text(&pool, id), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_translation_link_is_nulled_on_delete() {
        let (pool, corpus_id) = pool_with_corpus();
        let original = create_text(&pool, "Original", None, "Hola", corpus_id, None).unwrap();
        let translated =
            create_text(&pool, "Translated", None, "Hello", corpus_id, Some(original)).unwrap();

        delete_text(&pool, original).unwrap();

        let row = get_text(&pool, translated).unwrap();
        assert_eq!(row.has_translation_id, None);
    }

    #[test]
    fn test_list_for_corpus() {
        let (pool, corpus_id) = pool_with_corpus();
        let other = corpora::create_corpus(&pool, "Other", None, "misc").unwrap();
        create_text(&pool, "One", None, "1", corpus_id, None).unwrap();
        create_text(&pool, "Two", None, "2", corpus_id, None).unwrap();
        create_text(&pool, "Elsewhere", None, "3", other, None).unwrap();

        let rows = list_texts_for_corpus(&pool, corpus_id).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "One");
    }
}
