// =============================================================================
// Option Chain Payload — Typed model of the NSE option-chain-v3 response
// =============================================================================
//
// Only the fields the engine consumes are modelled; the exchange sends many
// more (implied vol, bid/ask ladders, totals) which deserialisation ignores.
// A strike record may carry only a call side or only a put side; the missing
// side is treated as zero open interest, never dropped.

use serde::{Deserialize, Serialize};

/// Full option-chain payload for one index, as returned by
/// `GET /api/option-chain-v3?type=Indices&symbol=...&expiry=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    pub records: ChainRecords,
}

/// The `records` envelope: spot price, expiry list, and per-strike data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRecords {
    /// Upcoming expiry dates, nearest first (e.g. "28-Aug-2025").
    #[serde(rename = "expiryDates", default)]
    pub expiry_dates: Vec<String>,

    /// Spot price of the underlying index.
    #[serde(rename = "underlyingValue")]
    pub underlying_value: f64,

    /// Per-strike records, in whatever order the exchange emits them.
    #[serde(default)]
    pub data: Vec<StrikeEntry>,
}

impl ChainRecords {
    /// Nearest expiry date, if the payload carries any.
    pub fn nearest_expiry(&self) -> Option<&str> {
        self.expiry_dates.first().map(String::as_str)
    }
}

/// One strike's record. Either option side may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeEntry {
    #[serde(rename = "strikePrice")]
    pub strike_price: f64,

    #[serde(rename = "CE", skip_serializing_if = "Option::is_none")]
    pub ce: Option<SideQuote>,

    #[serde(rename = "PE", skip_serializing_if = "Option::is_none")]
    pub pe: Option<SideQuote>,
}

/// Open-interest figures for one side (call or put) of a strike.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideQuote {
    #[serde(rename = "openInterest", default)]
    pub open_interest: i64,

    #[serde(rename = "changeinOpenInterest", default)]
    pub change_in_open_interest: i64,
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_payload() {
        let json = r#"{
            "records": {
                "expiryDates": ["28-Aug-2025", "04-Sep-2025"],
                "underlyingValue": 22505.35,
                "data": [
                    {
                        "strikePrice": 22500,
                        "CE": { "openInterest": 1200, "changeinOpenInterest": -150 },
                        "PE": { "openInterest": 3400, "changeinOpenInterest": 900 }
                    },
                    { "strikePrice": 22550, "CE": { "openInterest": 5000 } }
                ]
            }
        }"#;

        let chain: OptionChain = serde_json::from_str(json).unwrap();
        let records = &chain.records;

        assert_eq!(records.nearest_expiry(), Some("28-Aug-2025"));
        assert!((records.underlying_value - 22505.35).abs() < 1e-9);
        assert_eq!(records.data.len(), 2);

        let first = &records.data[0];
        assert_eq!(first.ce.as_ref().unwrap().open_interest, 1200);
        assert_eq!(first.ce.as_ref().unwrap().change_in_open_interest, -150);
        assert_eq!(first.pe.as_ref().unwrap().open_interest, 3400);

        // Second record has no PE side and no changeinOpenInterest on CE.
        let second = &records.data[1];
        assert!(second.pe.is_none());
        assert_eq!(second.ce.as_ref().unwrap().change_in_open_interest, 0);
    }

    #[test]
    fn missing_data_array_defaults_empty() {
        let json = r#"{ "records": { "underlyingValue": 48210.0 } }"#;
        let chain: OptionChain = serde_json::from_str(json).unwrap();
        assert!(chain.records.data.is_empty());
        assert!(chain.records.expiry_dates.is_empty());
        assert_eq!(chain.records.nearest_expiry(), None);
    }

    #[test]
    fn roundtrip_keeps_side_fields() {
        let json = r#"{
            "records": {
                "expiryDates": ["28-Aug-2025"],
                "underlyingValue": 22500.0,
                "data": [
                    {
                        "strikePrice": 22450,
                        "PE": { "openInterest": 10, "changeinOpenInterest": 5 }
                    }
                ]
            }
        }"#;
        let chain: OptionChain = serde_json::from_str(json).unwrap();
        let back = serde_json::to_string(&chain).unwrap();
        let again: OptionChain = serde_json::from_str(&back).unwrap();

        let entry = &again.records.data[0];
        assert!(entry.ce.is_none());
        assert_eq!(entry.pe.as_ref().unwrap().open_interest, 10);
        assert_eq!(entry.pe.as_ref().unwrap().change_in_open_interest, 5);
    }
}
