// =============================================================================
// Walls & Level Classification — Where spot sits in the OI landscape
// =============================================================================
//
// The strike carrying the window's maximum put OI is the support wall; the
// maximum call OI strike is the resistance wall.  Ties resolve to the lowest
// strike (window rows are sorted ascending and the scan uses strict `>`).
//
// Spot is AT a wall when it lies within `step * level_tol` of it; the support
// check runs first, so a spot inside both tolerances classifies as SUPPORT.

use crate::chain::window::StrikeWindow;
use crate::types::Level;

/// The support and resistance strikes, `None` when the window is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Walls {
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

/// Extract the put and call walls from the window.
pub fn walls(window: &StrikeWindow) -> Walls {
    let mut support: Option<(f64, i64)> = None;
    let mut resistance: Option<(f64, i64)> = None;

    for row in &window.rows {
        match support {
            Some((_, max_oi)) if row.pe_oi <= max_oi => {}
            _ => support = Some((row.strike, row.pe_oi)),
        }
        match resistance {
            Some((_, max_oi)) if row.ce_oi <= max_oi => {}
            _ => resistance = Some((row.strike, row.ce_oi)),
        }
    }

    Walls {
        support: support.map(|(strike, _)| strike),
        resistance: resistance.map(|(strike, _)| strike),
    }
}

/// Classify where spot sits relative to the walls.
pub fn classify(spot: f64, walls: Walls, step: f64, level_tol: u32) -> Level {
    let tol = step * f64::from(level_tol);

    if let Some(support) = walls.support {
        if (spot - support).abs() <= tol {
            return Level::Support;
        }
    }
    if let Some(resistance) = walls.resistance {
        if (spot - resistance).abs() <= tol {
            return Level::Resistance;
        }
    }
    Level::Mid
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::window::StrikeRow;

    fn row(strike: f64, ce_oi: i64, pe_oi: i64) -> StrikeRow {
        StrikeRow {
            strike,
            ce_oi,
            ce_doi: 0,
            pe_oi,
            pe_doi: 0,
        }
    }

    fn window(rows: Vec<StrikeRow>) -> StrikeWindow {
        StrikeWindow {
            rows,
            atm: 22500.0,
            spot: 22505.0,
            step: 50.0,
        }
    }

    #[test]
    fn walls_pick_max_oi_strikes() {
        let w = window(vec![
            row(22450.0, 100, 900),
            row(22500.0, 300, 400),
            row(22550.0, 800, 200),
        ]);
        let walls = walls(&w);
        assert_eq!(walls.support, Some(22450.0));
        assert_eq!(walls.resistance, Some(22550.0));
    }

    #[test]
    fn tied_max_oi_resolves_to_lowest_strike() {
        let w = window(vec![
            row(22450.0, 500, 900),
            row(22500.0, 500, 900),
            row(22550.0, 500, 900),
        ]);
        let walls = walls(&w);
        assert_eq!(walls.support, Some(22450.0));
        assert_eq!(walls.resistance, Some(22450.0));
    }

    #[test]
    fn empty_window_has_no_walls() {
        let w = window(vec![]);
        assert_eq!(walls(&w), Walls::default());
    }

    #[test]
    fn spot_within_tolerance_of_support() {
        let walls = Walls {
            support: Some(22450.0),
            resistance: Some(22700.0),
        };
        // |22480 - 22450| = 30 <= 50
        assert_eq!(classify(22480.0, walls, 50.0, 1), Level::Support);
    }

    #[test]
    fn support_check_takes_priority() {
        // Spot within tolerance of both walls: support wins.
        let walls = Walls {
            support: Some(22450.0),
            resistance: Some(22500.0),
        };
        assert_eq!(classify(22475.0, walls, 50.0, 1), Level::Support);
    }

    #[test]
    fn spot_near_resistance_only() {
        // spot 22505: 55 above support 22450 (outside 50), 45 below
        // resistance 22550 (inside 50).
        let walls = Walls {
            support: Some(22450.0),
            resistance: Some(22550.0),
        };
        assert_eq!(classify(22505.0, walls, 50.0, 1), Level::Resistance);
    }

    #[test]
    fn far_from_both_walls_is_mid() {
        let walls = Walls {
            support: Some(22300.0),
            resistance: Some(22700.0),
        };
        assert_eq!(classify(22505.0, walls, 50.0, 1), Level::Mid);
    }

    #[test]
    fn missing_walls_classify_mid() {
        assert_eq!(classify(22505.0, Walls::default(), 50.0, 1), Level::Mid);
    }
}
