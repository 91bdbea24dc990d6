use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use pliage_db::rusqlite::Connection;

use pliage_db::db::insert_draw;
use pliage_db::models::{BALL_COUNT, Draw, validate_draw};

/// Politique face à une ligne malformée : abandon immédiat (défaut) ou
/// ligne ignorée avec diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicy {
    Strict,
    Permissive,
}

#[derive(Debug)]
pub struct ImportResult {
    pub total_lines: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Une ligne = `<période:≤7> <ruleset> <b1>..<b6> <bonus>`, champs séparés
/// par des blancs.
pub fn parse_line(line: &str) -> Result<Draw> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 9 {
        bail!("9 champs attendus, {} lus", fields.len());
    }

    let period = fields[0];
    if period.len() > 7 {
        bail!("Identifiant de période trop long : '{}'", period);
    }

    let rule_set: i32 = fields[1]
        .parse()
        .with_context(|| format!("Ruleset invalide : '{}'", fields[1]))?;

    let mut balls = [0u8; BALL_COUNT];
    for (i, ball) in balls.iter_mut().enumerate() {
        *ball = fields[2 + i]
            .parse()
            .with_context(|| format!("Boule invalide : '{}'", fields[2 + i]))?;
    }
    validate_draw(&balls)?;

    let bonus: u8 = fields[8]
        .parse()
        .with_context(|| format!("Bonus invalide : '{}'", fields[8]))?;

    Ok(Draw {
        period: period.to_string(),
        rule_set,
        balls,
        bonus,
    })
}

pub fn import_file(conn: &Connection, path: &Path, policy: ImportPolicy) -> Result<ImportResult> {
    let file =
        File::open(path).with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    import_lines(conn, BufReader::new(file), policy)
}

pub fn import_lines(
    conn: &Connection,
    reader: impl BufRead,
    policy: ImportPolicy,
) -> Result<ImportResult> {
    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_lines: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Erreur de lecture ligne {}", line_no))?;
        if line.trim().is_empty() {
            continue;
        }
        result.total_lines += 1;

        match parse_line(&line) {
            Ok(draw) => {
                if insert_draw(&tx, &draw)? {
                    result.inserted += 1;
                } else {
                    result.skipped += 1;
                }
            }
            Err(e) => match policy {
                ImportPolicy::Strict => {
                    return Err(e.context(format!("Ligne {} malformée", line_no)));
                }
                ImportPolicy::Permissive => {
                    eprintln!("Ligne {} ignorée : {:#}", line_no, e);
                    result.errors += 1;
                }
            },
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
