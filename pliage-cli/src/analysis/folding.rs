use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use pliage_db::models::{BALL_COUNT, BALL_MAX, BALL_MIN, Draw, PositionProfile, Prediction};

use super::position_moments;

/// Fraction de repli, 1 - 1/φ. Constante du procédé, non configurable.
const MAGIC: f64 = 0.381966011;

/// Au-delà, la résolution de collision abandonne le tirage aléatoire
/// et prend le plus petit numéro libre.
const MAX_RANDOM_ATTEMPTS: u32 = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("historique vide")]
    EmptyHistory,
    #[error("tirage {period} invalide : boule {value} hors limites (1-33)")]
    InvalidRecord { period: String, value: u8 },
}

/// Replie la fenêtre [1, 33] sur une suite de valeurs, de la plus récente à
/// la plus ancienne. À chaque valeur la borne la plus proche est rapprochée
/// (valeur dans la fenêtre) ou éloignée (valeur hors fenêtre) d'une fraction
/// fixe du segment. Les bornes peuvent sortir de [1, 33] et rien ne garantit
/// low <= high par construction : comportement hérité, reproduit tel quel.
pub fn fold_window(values: impl Iterator<Item = u8>) -> (f64, f64) {
    let mut low = BALL_MIN as f64;
    let mut high = BALL_MAX as f64;

    for v in values {
        let v = v as f64;
        let cut = (high - low) * MAGIC;
        let center = (low + high) / 2.0;
        let prefer_right = v > center; // égalité au centre : côté gauche

        if v < low || v > high {
            // valeur hors fenêtre : la fenêtre était trop étroite, on étend
            if prefer_right {
                high += cut;
            } else {
                low -= cut;
            }
        } else {
            // valeur dans la fenêtre : la fenêtre était trop large, on resserre
            if prefer_right {
                high -= cut;
            } else {
                low += cut;
            }
        }
    }

    (low, high)
}

/// Calcule une prédiction sur l'historique donné, du plus ancien au plus
/// récent. `seed` rend la résolution de collision reproductible.
pub fn predict(
    history: &[Draw],
    seed: Option<u64>,
) -> Result<(Prediction, [PositionProfile; BALL_COUNT]), PredictError> {
    if history.is_empty() {
        return Err(PredictError::EmptyHistory);
    }
    for draw in history {
        for &b in &draw.balls {
            if b < BALL_MIN || b > BALL_MAX {
                return Err(PredictError::InvalidRecord {
                    period: draw.period.clone(),
                    value: b,
                });
            }
        }
    }

    let moments = position_moments(history);

    let mut balls = [0u8; BALL_COUNT];
    let mut profiles = [PositionProfile {
        mean: 0.0,
        std_dev: 0.0,
        low: 0.0,
        high: 0.0,
    }; BALL_COUNT];

    for j in 0..BALL_COUNT {
        let (low, high) = fold_window(history.iter().rev().map(|d| d.balls[j]));
        let center = (low + high) / 2.0;
        balls[j] = center.round().clamp(BALL_MIN as f64, BALL_MAX as f64) as u8;
        profiles[j] = PositionProfile {
            mean: moments[j].0,
            std_dev: moments[j].1,
            low,
            high,
        };
    }

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    resolve_collisions(&mut balls, &profiles, &mut rng);

    Ok((Prediction { balls }, profiles))
}

/// Rend les 6 numéros deux à deux distincts : chaque position en conflit avec
/// une position précédente est perturbée d'un décalage aléatoire proportionnel
/// à l'écart-type de sa colonne, rebouclé dans [1, 33]. Écart-type nul (ou
/// décalage arrondi à zéro) : incrément fixe de 1, pour éviter le point fixe.
fn resolve_collisions(
    balls: &mut [u8; BALL_COUNT],
    profiles: &[PositionProfile; BALL_COUNT],
    rng: &mut StdRng,
) {
    for j in 1..BALL_COUNT {
        let mut attempts = 0u32;
        while balls[..j].contains(&balls[j]) {
            attempts += 1;
            if attempts > MAX_RANDOM_ATTEMPTS {
                balls[j] = smallest_free(&balls[..j]);
                break;
            }

            let sigma = profiles[j].std_dev;
            let mut offset = if sigma > 0.0 {
                ((rng.random::<f64>() * 2.0 - 1.0) * sigma).round() as i64
            } else {
                1
            };
            if offset == 0 {
                offset = 1;
            }

            let wrapped =
                (balls[j] as i64 - 1 + offset).rem_euclid(BALL_MAX as i64) + 1;
            balls[j] = wrapped as u8;
        }
    }
}

fn smallest_free(taken: &[u8]) -> u8 {
    (BALL_MIN..=BALL_MAX)
        .find(|n| !taken.contains(n))
        .unwrap_or(BALL_MIN)
}
