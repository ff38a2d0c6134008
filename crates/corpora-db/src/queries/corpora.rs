//! Corpus queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;

/// Corpus row from database.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub genre: String,
}

fn map_corpus(row: &rusqlite::Row<'_>) -> rusqlite::Result<CorpusRow> {
    Ok(CorpusRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        genre: row.get(3)?,
    })
}

/// Insert a corpus and return its id.
pub fn create_corpus(
    pool: &DbPool,
    title: &str,
    description: Option<&str>,
    genre: &str,
) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO corpus (title, description, genre) VALUES (?1, ?2, ?3)",
            params![title, description, genre],
        )?;
        Ok(conn.last_insert_rowid())
    })
}

/// Get a corpus by ID.
pub fn get_corpus(pool: &DbPool, id: i64) -> DbResult<CorpusRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, title, description, genre FROM corpus WHERE id = ?1",
            params![id],
            map_corpus,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Corpus: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List all corpora ordered by id.
pub fn list_corpora(pool: &DbPool) -> DbResult<Vec<CorpusRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT id, title, description, genre FROM corpus ORDER BY id")?;
        let rows = stmt.query_map([], map_corpus)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Overwrite every column of an existing corpus.
pub fn update_corpus(pool: &DbPool, row: &CorpusRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE corpus SET title = ?2, description = ?3, genre = ?4 WHERE id = ?1",
            params![row.id, row.title, row.description, row.genre],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Corpus: {}", row.id)));
        }
        Ok(())
    })
}

/// Delete a corpus. Its texts go with it (ON DELETE CASCADE).
pub fn delete_corpus(pool: &DbPool, id: i64) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM corpus WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Corpus: {}", id)));
        }
        Ok(())
    })
}
