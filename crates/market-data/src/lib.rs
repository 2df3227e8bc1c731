use crate::responses::ChartResponse;
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use configuration::MarketDataSettings;
use core_types::{PricePoint, PriceSeries, Ticker};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::BTreeMap;
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::FetchError;

/// The abstract capability the comparison needs from a market data provider.
///
/// Implementations return the daily closing prices of `ticker` for every
/// trading day in `start..=end`. An unknown ticker or transport failure is an
/// error; a valid ticker with no trading days in the range (including
/// `start > end`) is an empty series.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_closes(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError>;
}

/// A `MarketDataSource` backed by the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: Url,
}

impl YahooClient {
    pub fn new(settings: &MarketDataSettings) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| FetchError::InvalidData(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let base_url = Url::parse(settings.base_url.trim()).map_err(|e| {
            FetchError::InvalidData(format!("Invalid base URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidData(format!(
                "Base URL cannot carry a path: {}",
                settings.base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// `{base_url}/v8/finance/chart/{ticker}`, with the ticker as one
    /// percent-encoded path segment.
    fn chart_url(&self, ticker: &Ticker) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", ticker.as_str()]);
        }
        url
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn fetch_closes(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        if start > end {
            return Ok(PriceSeries::empty());
        }

        let url = self.chart_url(ticker);
        let (period1, period2) = period_bounds(start, end)?;

        tracing::debug!(%ticker, %start, %end, "Requesting daily chart.");

        let response = self
            .client
            .get(url)
            .query(&[
                ("period1", period1.to_string().as_str()),
                ("period2", period2.to_string().as_str()),
                ("interval", "1d"),
                ("events", "history"),
            ])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() || status == StatusCode::NOT_FOUND {
            parse_chart(ticker, &text, start, end)
        } else {
            Err(FetchError::SourceError(format!(
                "HTTP {} for {}",
                status, ticker
            )))
        }
    }
}

/// Unix timestamps covering `start` 00:00 UTC up to the end of `end`.
fn period_bounds(start: NaiveDate, end: NaiveDate) -> Result<(i64, i64), FetchError> {
    let after_end = end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| FetchError::InvalidData(format!("End date out of range: {}", end)))?;
    let to_unix = |date: NaiveDate| date.and_time(NaiveTime::default()).and_utc().timestamp();
    Ok((to_unix(start), to_unix(after_end)))
}

/// Builds a closing-price series from a chart API response body.
///
/// Bars are dated in the exchange's local timezone. Bars without a close, or
/// dated outside `start..=end`, are skipped. If several bars fall on the same
/// date the last one wins.
pub fn parse_chart(
    ticker: &Ticker,
    body: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Deserialization(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(FetchError::UnknownTicker(
            ticker.to_string(),
            format!("{}: {}", error.code, error.description),
        ));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| {
            FetchError::UnknownTicker(ticker.to_string(), "no chart data in response".to_string())
        })?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|quote| quote.close)
        .unwrap_or_default();

    let mut by_date = BTreeMap::new();
    for (ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close else {
            continue;
        };
        let date = DateTime::from_timestamp(ts + result.meta.gmtoffset, 0)
            .ok_or_else(|| FetchError::InvalidData(format!("Invalid timestamp: {}", ts)))?
            .date_naive();
        if date < start || date > end {
            continue;
        }
        let price = Decimal::from_f64(close)
            .ok_or_else(|| FetchError::InvalidData(format!("Invalid close price: {}", close)))?;
        by_date.insert(date, price);
    }

    let points = by_date
        .into_iter()
        .map(|(date, price)| PricePoint::new(date, price))
        .collect();

    PriceSeries::new(points).map_err(|e| FetchError::InvalidData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ticker() -> Ticker {
        Ticker::parse("AAPL").unwrap()
    }

    // Three sessions opening at 09:30 New York time (UTC-5), the middle one
    // without a close.
    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -18000, "currency": "USD" },
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{ "close": [185.64, null, 181.91], "open": [187.15, 184.22, 182.15] }],
                    "adjclose": [{ "adjclose": [184.9, 183.5, 181.2] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_close_prices_by_exchange_date() {
        let series = parse_chart(&ticker(), CHART, date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        let points = series.points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, date(2024, 1, 2));
        assert_eq!(points[0].price.round_dp(6), dec!(185.64));
        assert_eq!(points[1].date, date(2024, 1, 4));
        assert_eq!(points[1].price.round_dp(6), dec!(181.91));
    }

    #[test]
    fn drops_bars_outside_the_requested_range() {
        let series = parse_chart(&ticker(), CHART, date(2024, 1, 3), date(2024, 1, 31)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.first().unwrap().date, date(2024, 1, 4));
    }

    #[test]
    fn empty_range_yields_empty_series() {
        let body = r#"{
            "chart": {
                "result": [{ "meta": { "symbol": "AAPL" }, "indicators": { "quote": [{}] } }],
                "error": null
            }
        }"#;
        let series = parse_chart(&ticker(), body, date(2024, 1, 6), date(2024, 1, 7)).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn chart_error_is_unknown_ticker() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        }"#;
        let err = parse_chart(&ticker(), body, date(2024, 1, 1), date(2024, 1, 31)).unwrap_err();
        assert!(matches!(err, FetchError::UnknownTicker(symbol, _) if symbol == "AAPL"));
    }

    #[test]
    fn garbage_body_is_a_deserialization_error() {
        let err = parse_chart(&ticker(), "<html>", date(2024, 1, 1), date(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }

    #[test]
    fn period_covers_the_whole_end_day() {
        let (p1, p2) = period_bounds(date(2024, 1, 2), date(2024, 1, 2)).unwrap();
        assert_eq!(p1, 1704153600);
        assert_eq!(p2 - p1, 86_400);
    }

    fn client(base_url: &str) -> YahooClient {
        YahooClient::new(&MarketDataSettings {
            base_url: base_url.to_string(),
            timeout_secs: 1,
            user_agent: "stockpulse-test".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn chart_url_appends_the_symbol_as_one_segment() {
        let symbol = Ticker::parse("brk.b").unwrap();

        let url = client("https://query1.finance.yahoo.com").chart_url(&symbol);
        assert_eq!(url.as_str(), "https://query1.finance.yahoo.com/v8/finance/chart/BRK.B");

        // A trailing slash or an existing prefix path must not double up.
        let url = client("http://127.0.0.1:8080/proxy/").chart_url(&symbol);
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/v8/finance/chart/BRK.B");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let settings = MarketDataSettings {
            base_url: "not a url".to_string(),
            ..MarketDataSettings::default()
        };
        assert!(matches!(YahooClient::new(&settings), Err(FetchError::InvalidData(_))));
    }

    #[tokio::test]
    async fn reversed_range_skips_the_network() {
        let settings = MarketDataSettings {
            // Nothing listens here; the request must never be sent.
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            user_agent: "stockpulse-test".to_string(),
        };
        let client = YahooClient::new(&settings).unwrap();
        let series = client
            .fetch_closes(&ticker(), date(2024, 2, 1), date(2024, 1, 1))
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetches_live_closes() {
        let settings = MarketDataSettings::default();
        let client = YahooClient::new(&settings).unwrap();
        let series = client
            .fetch_closes(&ticker(), date(2024, 1, 2), date(2024, 1, 31))
            .await
            .unwrap();
        assert!(!series.is_empty());
    }
}
