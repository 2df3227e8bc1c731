//! # StockPulse Comparison
//!
//! The orchestrator that turns a list of tickers and a date range into a
//! `ComparisonResult`.
//!
//! ## Architectural Principles
//!
//! - **Fail the ticker, not the request:** A ticker whose data cannot be fetched
//!   or computed is reported with an empty series and no stats. Only malformed
//!   request input (unparseable dates) is an error.
//! - **Explicit Dependencies:** The data source, fetch timeout and optional
//!   archive are handed to the `Comparator`; there is no global state.
//!
//! ## Public API
//!
//! - `Comparator`: Runs a comparison.
//! - `ComparisonRequest`, `parse_tickers`, `parse_date`: Boundary input parsing.
//! - `RawDataArchive`: Append-only dump of fetched prices.
//! - `ComparisonError`: The specific error types that can be returned from this crate.

pub mod archive;
pub mod comparator;
pub mod error;
pub mod input;

pub use archive::RawDataArchive;
pub use comparator::Comparator;
pub use error::ComparisonError;
pub use input::{ComparisonRequest, parse_date, parse_tickers};
