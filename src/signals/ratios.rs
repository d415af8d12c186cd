// =============================================================================
// Put-Call Ratios — Aggregate OI and ΔOI ratios over the strike window
// =============================================================================
//
// PCR  = sum(PE_OI)  / sum(CE_OI)
// ΔPCR = sum(PE_DOI) / sum(CE_DOI)
//
// Both round to two decimals.  A zero call-side sum resolves the ratio to 0.0
// by convention; callers treat that as "no call interest", not a true ratio.

use crate::chain::window::StrikeWindow;

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Put-call ratio on open interest across the window.
pub fn pcr(window: &StrikeWindow) -> f64 {
    let ce_sum: i64 = window.rows.iter().map(|r| r.ce_oi).sum();
    if ce_sum == 0 {
        return 0.0;
    }
    let pe_sum: i64 = window.rows.iter().map(|r| r.pe_oi).sum();
    round2(pe_sum as f64 / ce_sum as f64)
}

/// Put-call ratio on change in open interest across the window.
///
/// ΔOI sums can be negative; a negative ratio means the sides are unwinding
/// in opposite directions.
pub fn delta_pcr(window: &StrikeWindow) -> f64 {
    let ce_sum: i64 = window.rows.iter().map(|r| r.ce_doi).sum();
    if ce_sum == 0 {
        return 0.0;
    }
    let pe_sum: i64 = window.rows.iter().map(|r| r.pe_doi).sum();
    round2(pe_sum as f64 / ce_sum as f64)
}
