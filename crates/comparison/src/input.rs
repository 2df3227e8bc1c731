use crate::error::ComparisonError;
use chrono::NaiveDate;
use core_types::Ticker;
use serde::Deserialize;

/// The raw form fields of a comparison request.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonRequest {
    /// Comma-separated symbols, e.g. "aapl, msft".
    pub tickers: String,
    /// ISO-8601 date, e.g. "2024-01-02".
    pub start_date: String,
    pub end_date: String,
}

/// Splits a comma-separated field into tickers, keeping order and duplicates.
///
/// Entries that cannot form a `Ticker` are skipped: blanks (from "AAPL,,MSFT"
/// or a trailing comma) and text with characters no symbol uses, such as
/// "../x" or "A?B".
pub fn parse_tickers(raw: &str) -> Vec<Ticker> {
    raw.split(',')
        .filter_map(|token| match Ticker::parse(token) {
            Ok(ticker) => Some(ticker),
            Err(e) => {
                tracing::warn!(entry = %token, error = %e, "Skipping invalid ticker entry.");
                None
            }
        })
        .collect()
}

/// Parses an ISO-8601 calendar date. `field` names the input in the error.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ComparisonError> {
    raw.trim()
        .parse::<NaiveDate>()
        .map_err(|e| ComparisonError::InvalidDate(field.to_string(), format!("'{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickers_are_trimmed_uppercased_and_kept_in_order() {
        let tickers = parse_tickers(" aapl,MSFT , goog");
        let symbols: Vec<_> = tickers.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let tickers = parse_tickers("AAPL,aapl");
        assert_eq!(tickers.len(), 2);
        assert_eq!(tickers[0], tickers[1]);
    }

    #[test]
    fn blank_entries_are_skipped() {
        let tickers = parse_tickers("AAPL, ,MSFT,");
        let symbols: Vec<_> = tickers.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
        assert!(parse_tickers("").is_empty());
    }

    #[test]
    fn entries_with_path_characters_are_skipped() {
        let tickers = parse_tickers("../escaped,aapl,a/b,msft?x=1");
        let symbols: Vec<_> = tickers.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, vec!["AAPL"]);
    }

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(
            parse_date("start_date", " 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );

        let err = parse_date("end_date", "02/29/2024").unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidDate(field, _) if field == "end_date"));
        assert!(parse_date("end_date", "2023-02-29").is_err());
    }
}
