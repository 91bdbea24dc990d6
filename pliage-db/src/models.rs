use anyhow::{bail, Result};

/// Domaine des boules principales (1-33).
pub const BALL_MIN: u8 = 1;
pub const BALL_MAX: u8 = 33;

/// Nombre de positions prédites par tirage.
pub const BALL_COUNT: usize = 6;

#[derive(Debug, Clone)]
pub struct Draw {
    pub period: String,
    pub rule_set: i32,
    pub balls: [u8; BALL_COUNT],
    pub bonus: u8,
}

/// Résultat du moteur : 6 numéros, deux à deux distincts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub balls: [u8; BALL_COUNT],
}

/// Diagnostic par position : statistiques et fenêtre finale du pliage.
#[derive(Debug, Clone, Copy)]
pub struct PositionProfile {
    pub mean: f64,
    pub std_dev: f64,
    pub low: f64,
    pub high: f64,
}

impl PositionProfile {
    pub fn center(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

pub fn validate_draw(balls: &[u8; BALL_COUNT]) -> Result<()> {
    for &b in balls {
        if b < BALL_MIN || b > BALL_MAX {
            bail!("Boule {} hors limites (1-33)", b);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert!(validate_draw(&[33, 32, 31, 30, 29, 28]).is_ok());
    }

    #[test]
    fn test_validate_draw_out_of_range() {
        assert!(validate_draw(&[0, 2, 3, 4, 5, 6]).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5, 34]).is_err());
    }

    #[test]
    fn test_validate_draw_duplicates_allowed() {
        // l'historique brut peut contenir des doublons, seul le domaine compte
        assert!(validate_draw(&[7, 7, 7, 7, 7, 7]).is_ok());
    }

    #[test]
    fn test_profile_center() {
        let p = PositionProfile {
            mean: 0.0,
            std_dev: 0.0,
            low: 1.0,
            high: 33.0,
        };
        assert!((p.center() - 17.0).abs() < 1e-12);
    }
}
