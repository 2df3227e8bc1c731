use crate::archive::RawDataArchive;
use crate::error::ComparisonError;
use crate::input::{ComparisonRequest, parse_date, parse_tickers};
use analytics::{AnalyticsError, normalize, summarize};
use chrono::NaiveDate;
use configuration::Config;
use core_types::{ComparisonResult, NormalizedSeries, SummaryStats, Ticker, TickerSeries};
use market_data::{FetchError, MarketDataSource};
use std::sync::Arc;
use std::time::Duration;

/// Why a ticker ended up without data.
#[derive(Debug)]
enum NoData {
    Fetch(FetchError),
    Empty,
    Analytics(AnalyticsError),
}

/// Compares the performance of several tickers over one date range.
///
/// Tickers are processed one after another with a single fetch attempt each.
/// A ticker that fails in any way is degraded to "no data" so the rest of the
/// comparison still completes.
#[derive(Clone)]
pub struct Comparator {
    source: Arc<dyn MarketDataSource>,
    fetch_timeout: Duration,
    archive: Option<RawDataArchive>,
}

impl Comparator {
    pub fn new(source: Arc<dyn MarketDataSource>, fetch_timeout: Duration) -> Self {
        Self {
            source,
            fetch_timeout,
            archive: None,
        }
    }

    /// Builds a comparator with the timeout and archive taken from `config`.
    pub fn from_config(source: Arc<dyn MarketDataSource>, config: &Config) -> Self {
        let comparator = Self::new(source, Duration::from_secs(config.market_data.timeout_secs));
        if config.archive.enabled {
            comparator.with_archive(RawDataArchive::new(&config.archive.output_dir))
        } else {
            comparator
        }
    }

    /// Also appends every successfully fetched series to `archive`.
    pub fn with_archive(mut self, archive: RawDataArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Parses the raw request fields and runs the comparison.
    ///
    /// Unparseable dates are the only error.
    pub async fn compare_request(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, ComparisonError> {
        let start = parse_date("start_date", &request.start_date)?;
        let end = parse_date("end_date", &request.end_date)?;
        let tickers = parse_tickers(&request.tickers);
        Ok(self.compare(&tickers, start, end).await)
    }

    /// Runs the comparison for `tickers`, in order.
    ///
    /// Every ticker gets an entry in `normalized_series` (empty when it has no
    /// usable data); only tickers with data get `summary_stats`.
    #[tracing::instrument(name = "compare", skip(self, tickers), fields(tickers = tickers.len()))]
    pub async fn compare(
        &self,
        tickers: &[Ticker],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ComparisonResult {
        let mut result = ComparisonResult::new(start, end);

        for ticker in tickers {
            let series = match self.process_ticker(ticker, start, end).await {
                Ok((normalized, stats)) => {
                    result.summary_stats.push(stats);
                    normalized
                }
                Err(reason) => {
                    log_no_data(ticker, &reason);
                    NormalizedSeries::empty()
                }
            };
            result.normalized_series.push(TickerSeries {
                ticker: ticker.clone(),
                series,
            });
        }

        tracing::info!(
            requested = tickers.len(),
            with_data = result.summary_stats.len(),
            "Comparison complete."
        );

        result
    }

    async fn process_ticker(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(NormalizedSeries, SummaryStats), NoData> {
        let fetch = self.source.fetch_closes(ticker, start, end);
        let prices = match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(prices)) => prices,
            Ok(Err(e)) => return Err(NoData::Fetch(e)),
            Err(_elapsed) => {
                return Err(NoData::Fetch(FetchError::Timeout(self.fetch_timeout)));
            }
        };

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.record(ticker, start, end, &prices).await {
                tracing::warn!(%ticker, error = %e, "Failed to archive raw prices.");
            }
        }

        if prices.is_empty() {
            return Err(NoData::Empty);
        }

        let normalized = normalize(&prices).map_err(NoData::Analytics)?;
        let stats = summarize(&prices, ticker).map_err(NoData::Analytics)?;

        Ok((normalized, stats))
    }
}

fn log_no_data(ticker: &Ticker, reason: &NoData) {
    match reason {
        NoData::Fetch(FetchError::UnknownTicker(_, detail)) => {
            tracing::warn!(%ticker, %detail, "Unknown ticker, no data.");
        }
        NoData::Fetch(e) => {
            tracing::warn!(%ticker, error = %e, "Fetch failed, no data.");
        }
        NoData::Empty => {
            tracing::warn!(%ticker, "No prices in the requested range.");
        }
        NoData::Analytics(AnalyticsError::Computation(detail)) => {
            tracing::warn!(%ticker, %detail, "Price series cannot be evaluated, no data.");
        }
        NoData::Analytics(AnalyticsError::InsufficientData(detail)) => {
            // Empty series are caught before analysis.
            tracing::error!(%ticker, %detail, "Unexpected insufficient data.");
        }
    }
}
