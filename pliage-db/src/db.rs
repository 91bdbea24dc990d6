use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    period    TEXT PRIMARY KEY,
    rule_set  INTEGER NOT NULL,
    ball_1    INTEGER NOT NULL,
    ball_2    INTEGER NOT NULL,
    ball_3    INTEGER NOT NULL,
    ball_4    INTEGER NOT NULL,
    ball_5    INTEGER NOT NULL,
    ball_6    INTEGER NOT NULL,
    bonus     INTEGER NOT NULL DEFAULT 0
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("pliage.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (period, rule_set, ball_1, ball_2, ball_3, ball_4, ball_5, ball_6, bonus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            draw.period,
            draw.rule_set,
            draw.balls[0],
            draw.balls[1],
            draw.balls[2],
            draw.balls[3],
            draw.balls[4],
            draw.balls[5],
            draw.bonus,
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

/// Les tirages les plus récents d'abord, pour l'affichage.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT period, rule_set, ball_1, ball_2, ball_3, ball_4, ball_5, ball_6, bonus
         FROM draws ORDER BY rowid DESC LIMIT ?1",
    )?;
    let draws = stmt
        .query_map([limit], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

/// Les `limit` derniers tirages, rendus du plus ancien au plus récent —
/// l'ordre d'entrée du moteur. L'ordre d'insertion suit le fichier source,
/// lui-même en dates croissantes.
pub fn fetch_history(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT period, rule_set, ball_1, ball_2, ball_3, ball_4, ball_5, ball_6, bonus
         FROM (SELECT rowid AS rid, * FROM draws ORDER BY rowid DESC LIMIT ?1)
         ORDER BY rid ASC",
    )?;
    let draws = stmt
        .query_map([limit], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

fn row_to_draw(row: &rusqlite::Row<'_>) -> rusqlite::Result<Draw> {
    Ok(Draw {
        period: row.get(0)?,
        rule_set: row.get(1)?,
        balls: [
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
            row.get::<_, u8>(7)?,
        ],
        bonus: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draw(period: &str) -> Draw {
        Draw {
            period: period.to_string(),
            rule_set: 1,
            balls: [1, 2, 3, 4, 5, 6],
            bonus: 7,
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 0);

        insert_draw(&conn, &test_draw("2024001")).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let inserted = insert_draw(&conn, &test_draw("2024001")).unwrap();
        assert!(inserted);
        let inserted = insert_draw(&conn, &test_draw("2024001")).unwrap();
        assert!(!inserted);
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_fetch_last_draws_newest_first() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw("2024001")).unwrap();
        insert_draw(&conn, &test_draw("2024002")).unwrap();
        insert_draw(&conn, &test_draw("2024003")).unwrap();

        let draws = fetch_last_draws(&conn, 10).unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0].period, "2024003");
        assert_eq!(draws[2].period, "2024001");
    }

    #[test]
    fn test_fetch_history_oldest_first() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw("2024001")).unwrap();
        insert_draw(&conn, &test_draw("2024002")).unwrap();
        insert_draw(&conn, &test_draw("2024003")).unwrap();

        let draws = fetch_history(&conn, 2).unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].period, "2024002");
        assert_eq!(draws[1].period, "2024003");
    }
}
