//! # StockPulse Analytics
//!
//! Turns raw closing-price series into the two views used for a comparison:
//! a compounded percent-change curve and a small set of summary metrics.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of where prices come from. It
//!   depends only on `core-types`.
//! - **Exact Arithmetic:** All math is done on `Decimal`. Division by a zero
//!   price is reported as `AnalyticsError::Computation`, never as NaN or a panic.
//!
//! ## Public API
//!
//! - `normalize`: Cumulative percent change anchored at 0% on the first date.
//! - `summarize`: Total change, total percent change, mean and sample standard
//!   deviation of daily returns.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod normalizer;
pub mod returns;
pub mod summary;

pub use error::AnalyticsError;
pub use normalizer::normalize;
pub use returns::daily_returns;
pub use summary::summarize;
