use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::analysis::NumberStats;
use crate::import::ImportResult;
use pliage_db::models::{Draw, PositionProfile, Prediction};

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Période", "Ruleset", "Boules", "Bonus"]);

    for draw in draws {
        let balls_str = draw
            .balls
            .iter()
            .map(|b| format!("{:2}", b))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![
            &draw.period,
            &draw.rule_set.to_string(),
            &balls_str,
            &draw.bonus.to_string(),
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_lines);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_stats(stats: &[NumberStats], moments: &[(f64, f64)], window: u32) {
    println!("\n📊 Statistiques sur les {} derniers tirages\n", window);

    println!("── Numéros (1-33) ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Retard"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        table.add_row(vec![
            &format!("{:2}", stat.number),
            &stat.frequency.to_string(),
            &stat.gap.to_string(),
        ]);
    }
    println!("{table}");

    println!("\n── Positions ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Position", "Moyenne", "Écart-type"]);

    for (j, (mean, std_dev)) in moments.iter().enumerate() {
        table.add_row(vec![
            &format!("{}", j + 1),
            &format!("{:.2}", mean),
            &format!("{:.2}", std_dev),
        ]);
    }
    println!("{table}");
}

pub fn display_prediction(prediction: &Prediction) {
    let balls_str = prediction
        .balls
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("Prédiction : {}", balls_str);
}

/// Table de diagnostic du pliage, une ligne par position.
pub fn display_profiles(profiles: &[PositionProfile]) {
    println!("\n🔬 Fenêtres de pliage\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Position",
            "Moyenne",
            "Écart-type",
            "Borne basse",
            "Borne haute",
            "Centre",
        ]);

    for (j, p) in profiles.iter().enumerate() {
        table.add_row(vec![
            &format!("{}", j + 1),
            &format!("{:.2}", p.mean),
            &format!("{:.2}", p.std_dev),
            &format!("{:.3}", p.low),
            &format!("{:.3}", p.high),
            &format!("{:.3}", p.center()),
        ]);
    }
    println!("{table}");
}
