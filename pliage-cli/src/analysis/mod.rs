pub mod folding;

use pliage_db::models::{Draw, BALL_COUNT, BALL_MAX};

#[derive(Debug, Clone)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub gap: u32,
}

/// Fréquences et retards par numéro, `draws[0]` = tirage le plus récent.
pub fn compute_stats(draws: &[Draw]) -> Vec<NumberStats> {
    let mut stats: Vec<NumberStats> = (1..=BALL_MAX)
        .map(|n| NumberStats {
            number: n,
            frequency: 0,
            gap: 0,
        })
        .collect();

    for (i, draw) in draws.iter().enumerate() {
        for &n in &draw.balls {
            let idx = (n - 1) as usize;
            if idx < stats.len() {
                stats[idx].frequency += 1;
                if stats[idx].gap == 0 {
                    stats[idx].gap = i as u32;
                }
            }
        }
    }

    for stat in &mut stats {
        if stat.frequency == 0 {
            stat.gap = draws.len() as u32;
        }
    }

    stats
}

/// Moyenne et écart-type échantillon (dénominateur n-1) des valeurs
/// historiques à chaque position. Écart-type nul pour un seul tirage.
pub fn position_moments(history: &[Draw]) -> [(f64, f64); BALL_COUNT] {
    let n = history.len() as f64;
    let mut moments = [(0.0, 0.0); BALL_COUNT];

    for (j, m) in moments.iter_mut().enumerate() {
        let mean = history.iter().map(|d| d.balls[j] as f64).sum::<f64>() / n;
        let std_dev = if history.len() > 1 {
            let ss = history
                .iter()
                .map(|d| {
                    let delta = d.balls[j] as f64 - mean;
                    delta * delta
                })
                .sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        *m = (mean, std_dev);
    }

    moments
}
