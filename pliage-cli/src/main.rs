mod analysis;
mod display;
mod import;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::analysis::folding::predict;
use crate::analysis::{compute_stats, position_moments};
use crate::display::{
    display_draws, display_import_summary, display_prediction, display_profiles,
    display_stats,
};
use crate::import::{import_file, ImportPolicy};
use pliage_db::db::{count_draws, db_path, fetch_history, fetch_last_draws, migrate, open_db};

#[derive(Parser)]
#[command(name = "pliage", about = "Prédicteur de loto 6/33 par pliage d'intervalle")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer l'historique depuis un fichier texte (champs séparés par des blancs)
    Import {
        /// Chemin vers le fichier d'historique
        #[arg(short, long, default_value = "input.txt")]
        file: PathBuf,

        /// Ignorer les lignes malformées au lieu d'abandonner
        #[arg(long)]
        permissive: bool,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Afficher les statistiques (fréquences, retards, moments par position)
    Stats {
        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Prédire le prochain tirage
    Predict {
        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Afficher le diagnostic des fenêtres de pliage
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file, permissive } => cmd_import(&conn, &file, permissive),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { window } => cmd_stats(&conn, window),
        Command::Predict {
            window,
            seed,
            verbose,
        } => cmd_predict(&conn, window, seed, verbose),
    }
}

fn cmd_import(
    conn: &pliage_db::rusqlite::Connection,
    file: &PathBuf,
    permissive: bool,
) -> Result<()> {
    let policy = if permissive {
        ImportPolicy::Permissive
    } else {
        ImportPolicy::Strict
    };
    let result = import_file(conn, file, policy)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &pliage_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : pliage import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &pliage_db::rusqlite::Connection, window: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : pliage import");
        return Ok(());
    }
    let effective_window = window.min(n);
    let draws = fetch_last_draws(conn, effective_window)?;

    let stats = compute_stats(&draws);
    let moments = position_moments(&draws);

    display_stats(&stats, &moments, effective_window);
    Ok(())
}

fn cmd_predict(
    conn: &pliage_db::rusqlite::Connection,
    window: u32,
    seed: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : pliage import");
        return Ok(());
    }
    let effective_window = window.min(n);
    let history = fetch_history(conn, effective_window)?;

    let (prediction, profiles) = predict(&history, seed)?;

    display_prediction(&prediction);
    if verbose {
        display_profiles(&profiles);
    }

    Ok(())
}
