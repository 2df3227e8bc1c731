use crate::error::ComparisonError;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{PriceSeries, Ticker};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// One line of a ticker's archive file.
#[derive(Debug, Serialize)]
struct ArchiveRecord<'a> {
    ticker: &'a Ticker,
    start_date: NaiveDate,
    end_date: NaiveDate,
    fetched_at: DateTime<Utc>,
    prices: &'a PriceSeries,
}

/// An append-only dump of raw fetched prices, one JSON-lines file per ticker.
///
/// The archive is write-only: nothing in the comparison reads it back.
#[derive(Debug, Clone)]
pub struct RawDataArchive {
    dir: PathBuf,
}

impl RawDataArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that records for `ticker` are appended to.
    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.dir.join(format!("{}.jsonl", ticker))
    }

    /// Appends one fetch of `ticker` to its archive file.
    pub async fn record(
        &self,
        ticker: &Ticker,
        start_date: NaiveDate,
        end_date: NaiveDate,
        prices: &PriceSeries,
    ) -> Result<(), ComparisonError> {
        let record = ArchiveRecord {
            ticker,
            start_date,
            end_date,
            fetched_at: Utc::now(),
            prices,
        };
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        fs::create_dir_all(&self.dir).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(ticker))
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PricePoint;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn appends_one_line_per_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let archive = RawDataArchive::new(dir.path().join("output"));
        let ticker = Ticker::parse("aapl").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let prices = PriceSeries::new(vec![PricePoint::new(day, dec!(185.64))]).unwrap();

        archive.record(&ticker, day, day, &prices).await.unwrap();
        archive.record(&ticker, day, day, &PriceSeries::empty()).await.unwrap();

        let path = archive.path_for(&ticker);
        assert!(path.ends_with("output/AAPL.jsonl"));

        let contents = std::fs::read_to_string(path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["ticker"], "AAPL");
        assert_eq!(first["start_date"], "2024-01-02");
        assert_eq!(first["prices"][0]["price"], 185.64);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["prices"], serde_json::json!([]));
    }
}
