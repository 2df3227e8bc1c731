use crate::series::NormalizedSeries;
use crate::ticker::Ticker;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four headline metrics for one ticker over the requested window.
///
/// Every value is rounded to two decimal places. The serialized field names
/// are the column headers shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    #[serde(rename = "Ticker")]
    pub ticker: Ticker,
    #[serde(rename = "Total Change", with = "rust_decimal::serde::float")]
    pub total_change: Decimal,
    #[serde(rename = "Total Percent Change (%)", with = "rust_decimal::serde::float")]
    pub total_percent_change: Decimal,
    #[serde(rename = "Average Daily Change (%)", with = "rust_decimal::serde::float")]
    pub avg_daily_change_percent: Decimal,
    #[serde(
        rename = "Standard Deviation of Daily Change (%)",
        with = "rust_decimal::serde::float"
    )]
    pub std_daily_change_percent: Decimal,
}

/// The normalized curve for one requested ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSeries {
    pub ticker: Ticker,
    pub series: NormalizedSeries,
}

/// The outcome of comparing a set of tickers over one date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One entry per requested ticker, in request order. Tickers without
    /// usable data are present with an empty series.
    pub normalized_series: Vec<TickerSeries>,
    /// Only tickers that produced data, in request order.
    pub summary_stats: Vec<SummaryStats>,
}

impl ComparisonResult {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            normalized_series: Vec::new(),
            summary_stats: Vec::new(),
        }
    }

    /// Looks up the normalized series of the first entry for `ticker`.
    pub fn series_for(&self, ticker: &Ticker) -> Option<&NormalizedSeries> {
        self.normalized_series
            .iter()
            .find(|entry| &entry.ticker == ticker)
            .map(|entry| &entry.series)
    }

    /// Tickers that ended up with no data at all.
    pub fn missing_tickers(&self) -> Vec<&Ticker> {
        self.normalized_series
            .iter()
            .filter(|entry| entry.series.is_empty())
            .map(|entry| &entry.ticker)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_stats_serialize_with_display_keys() {
        let stats = SummaryStats {
            ticker: Ticker::parse("aapl").unwrap(),
            total_change: dec!(21.00),
            total_percent_change: dec!(21.00),
            avg_daily_change_percent: dec!(10.00),
            std_daily_change_percent: dec!(0.00),
        };

        let json = serde_json::to_value(&stats).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object["Ticker"], "AAPL");
        assert_eq!(object["Total Change"], 21.0);
        assert_eq!(object["Total Percent Change (%)"], 21.0);
        assert_eq!(object["Average Daily Change (%)"], 10.0);
        assert_eq!(object["Standard Deviation of Daily Change (%)"], 0.0);
    }

    #[test]
    fn series_for_and_missing_tickers() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let aapl = Ticker::parse("AAPL").unwrap();
        let bad = Ticker::parse("ZZZZ").unwrap();

        let mut result = ComparisonResult::new(day, day);
        result.normalized_series.push(TickerSeries {
            ticker: aapl.clone(),
            series: NormalizedSeries::new(vec![crate::PercentPoint {
                date: day,
                percent_change: dec!(0),
            }]),
        });
        result.normalized_series.push(TickerSeries {
            ticker: bad.clone(),
            series: NormalizedSeries::empty(),
        });

        assert_eq!(result.series_for(&aapl).unwrap().len(), 1);
        assert!(result.series_for(&bad).unwrap().is_empty());
        assert_eq!(result.missing_tickers(), vec![&bad]);
    }
}
