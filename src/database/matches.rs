use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{MatchRow, NewMatchRow};

const COLUMNS: &str = "id, date, match_type, match_format, player1, player2, player3, result, duration, venue, notes, created_at";

pub fn insert_match(conn: &mut DbConn, row: &NewMatchRow) -> Result<MatchRow> {
    let sql = format!(
        "INSERT INTO matches (date, match_type, match_format, player1, player2, player3, result, duration, venue, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            row.date,
            row.match_type,
            row.match_format,
            row.player1,
            row.player2,
            row.player3,
            row.result,
            row.duration,
            row.venue,
            row.notes
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    let id: i64 = row.get(0)?;

    Ok(MatchRow {
        id: id.to_string(),
        date: row.get(1)?,
        match_type: row.get(2)?,
        match_format: row.get(3)?,
        player1: row.get(4)?,
        player2: row.get(5)?,
        player3: row.get(6)?,
        result: row.get(7)?,
        duration: row.get(8)?,
        venue: row.get(9)?,
        notes: row.get(10)?,
        created_at: row.get(11)?,
    })
}

/// All matches, newest first
pub fn list_all(conn: &mut DbConn) -> Result<Vec<MatchRow>> {
    let sql = format!("SELECT {COLUMNS} FROM matches ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Returns whether a row was removed
pub fn delete_match(conn: &mut DbConn, id: i64) -> Result<bool> {
    let removed = conn
        .execute("DELETE FROM matches WHERE id = ?1", params![id])
        .context("Failed to delete match")?;

    Ok(removed > 0)
}

/// Changes whenever another connection commits to the database
pub fn data_version(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("PRAGMA data_version", [], |row| row.get(0))
        .context("Failed to read database data_version")
}
