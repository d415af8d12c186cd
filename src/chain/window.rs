// =============================================================================
// Strike Window Builder — Bounded, ordered view around the ATM anchor
// =============================================================================
//
// The raw chain carries the full strike ladder; the signal pipeline only looks
// at strikes within `strike_range` steps of the at-the-money anchor:
//
//   atm = round(spot / step) * step
//   keep strikes in [atm - step*strike_range, atm + step*strike_range]
//
// Rows are sorted by ascending strike so every downstream max-scan resolves
// ties toward the lowest strike.  Building a window never fails: a sparse or
// out-of-range chain just yields fewer (possibly zero) rows.

use crate::chain::snapshot::ChainRecords;

/// One strike's open-interest figures inside the window.  Sides the exchange
/// omitted are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeRow {
    pub strike: f64,
    pub ce_oi: i64,
    pub ce_doi: i64,
    pub pe_oi: i64,
    pub pe_doi: i64,
}

/// Bounded window of strikes around the ATM anchor, plus the anchor and spot
/// it was built from.  Recomputed every polling cycle.
#[derive(Debug, Clone)]
pub struct StrikeWindow {
    pub rows: Vec<StrikeRow>,
    pub atm: f64,
    pub spot: f64,
    pub step: f64,
}

impl StrikeWindow {
    /// Build the window from a chain snapshot.
    ///
    /// `step` is the index's strike spacing (50 for NIFTY, 100 for
    /// BANKNIFTY); `strike_range` the number of steps kept either side of
    /// the anchor, so the window holds at most `2 * strike_range + 1`
    /// strikes.
    pub fn build(records: &ChainRecords, step: u32, strike_range: u32) -> Self {
        let step = f64::from(step);
        let spot = records.underlying_value;
        // Half-way spots round away from zero: 22525 with step 50 anchors
        // at 22550.
        let atm = (spot / step).round() * step;

        let lo = atm - step * f64::from(strike_range);
        let hi = atm + step * f64::from(strike_range);

        let mut rows: Vec<StrikeRow> = records
            .data
            .iter()
            .filter(|entry| entry.strike_price >= lo && entry.strike_price <= hi)
            .map(|entry| {
                let ce = entry.ce.as_ref();
                let pe = entry.pe.as_ref();
                StrikeRow {
                    strike: entry.strike_price,
                    ce_oi: ce.map_or(0, |q| q.open_interest),
                    ce_doi: ce.map_or(0, |q| q.change_in_open_interest),
                    pe_oi: pe.map_or(0, |q| q.open_interest),
                    pe_doi: pe.map_or(0, |q| q.change_in_open_interest),
                }
            })
            .collect();

        rows.sort_by(|a, b| a.strike.total_cmp(&b.strike));

        Self { rows, atm, spot, step }
    }

    /// Rows within one step of the anchor, used for spike detection.
    pub fn near_rows(&self) -> impl Iterator<Item = &StrikeRow> {
        let lo = self.atm - self.step;
        let hi = self.atm + self.step;
        self.rows
            .iter()
            .filter(move |row| row.strike >= lo && row.strike <= hi)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::snapshot::{SideQuote, StrikeEntry};

    fn entry(strike: f64, ce_oi: i64, ce_doi: i64, pe_oi: i64, pe_doi: i64) -> StrikeEntry {
        StrikeEntry {
            strike_price: strike,
            ce: Some(SideQuote {
                open_interest: ce_oi,
                change_in_open_interest: ce_doi,
            }),
            pe: Some(SideQuote {
                open_interest: pe_oi,
                change_in_open_interest: pe_doi,
            }),
        }
    }

    fn records(spot: f64, entries: Vec<StrikeEntry>) -> ChainRecords {
        ChainRecords {
            expiry_dates: vec!["28-Aug-2025".to_string()],
            underlying_value: spot,
            data: entries,
        }
    }

    #[test]
    fn atm_rounds_to_nearest_step() {
        let recs = records(22505.0, vec![]);
        let window = StrikeWindow::build(&recs, 50, 5);
        assert!((window.atm - 22500.0).abs() < f64::EPSILON);

        let recs = records(22530.0, vec![]);
        let window = StrikeWindow::build(&recs, 50, 5);
        assert!((window.atm - 22550.0).abs() < f64::EPSILON);
    }

    #[test]
    fn atm_halfway_rounds_away_from_zero() {
        // 22525 / 50 = 450.5 — rounds up to 451, anchoring at 22550.
        let recs = records(22525.0, vec![]);
        let window = StrikeWindow::build(&recs, 50, 5);
        assert!((window.atm - 22550.0).abs() < f64::EPSILON);
    }

    #[test]
    fn window_keeps_only_strikes_in_range() {
        // spot 22505, step 50 => atm 22500, range [22250, 22750].
        let entries: Vec<StrikeEntry> = (0..20)
            .map(|i| entry(22000.0 + 50.0 * i as f64, 1, 0, 1, 0))
            .collect();
        let recs = records(22505.0, entries);
        let window = StrikeWindow::build(&recs, 50, 5);

        assert_eq!(window.rows.len(), 11);
        for row in &window.rows {
            assert!(row.strike >= 22250.0 && row.strike <= 22750.0);
        }
    }

    #[test]
    fn rows_are_sorted_ascending() {
        let entries = vec![
            entry(22600.0, 1, 0, 1, 0),
            entry(22400.0, 1, 0, 1, 0),
            entry(22500.0, 1, 0, 1, 0),
        ];
        let recs = records(22505.0, entries);
        let window = StrikeWindow::build(&recs, 50, 5);

        let strikes: Vec<f64> = window.rows.iter().map(|r| r.strike).collect();
        assert_eq!(strikes, vec![22400.0, 22500.0, 22600.0]);
    }

    #[test]
    fn missing_sides_default_to_zero() {
        let recs = ChainRecords {
            expiry_dates: vec![],
            underlying_value: 22500.0,
            data: vec![StrikeEntry {
                strike_price: 22500.0,
                ce: None,
                pe: Some(SideQuote {
                    open_interest: 700,
                    change_in_open_interest: -20,
                }),
            }],
        };
        let window = StrikeWindow::build(&recs, 50, 5);

        assert_eq!(window.rows.len(), 1);
        let row = &window.rows[0];
        assert_eq!(row.ce_oi, 0);
        assert_eq!(row.ce_doi, 0);
        assert_eq!(row.pe_oi, 700);
        assert_eq!(row.pe_doi, -20);
    }

    #[test]
    fn sparse_chain_yields_empty_window() {
        // All strikes far below the anchor.
        let entries = vec![entry(18000.0, 1, 0, 1, 0), entry(18100.0, 1, 0, 1, 0)];
        let recs = records(22505.0, entries);
        let window = StrikeWindow::build(&recs, 50, 5);
        assert!(window.is_empty());
    }

    #[test]
    fn near_rows_span_one_step_each_side() {
        let entries: Vec<StrikeEntry> = (0..11)
            .map(|i| entry(22250.0 + 50.0 * i as f64, 1, 0, 1, 0))
            .collect();
        let recs = records(22505.0, entries);
        let window = StrikeWindow::build(&recs, 50, 5);

        let near: Vec<f64> = window.near_rows().map(|r| r.strike).collect();
        assert_eq!(near, vec![22450.0, 22500.0, 22550.0]);
    }

    #[test]
    fn bigger_step_widens_the_window() {
        // BANKNIFTY-style spacing: step 100, spot 48190 => atm 48200,
        // range [47700, 48700].
        let entries: Vec<StrikeEntry> = (0..15)
            .map(|i| entry(47500.0 + 100.0 * i as f64, 1, 0, 1, 0))
            .collect();
        let recs = records(48190.0, entries);
        let window = StrikeWindow::build(&recs, 100, 5);

        assert!((window.atm - 48200.0).abs() < f64::EPSILON);
        assert_eq!(window.rows.len(), 11);
        assert!(window.rows.iter().all(|r| r.strike >= 47700.0 && r.strike <= 48700.0));
    }
}
