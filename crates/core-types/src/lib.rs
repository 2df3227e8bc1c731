pub mod error;
pub mod series;
pub mod structs;
pub mod ticker;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use series::{NormalizedSeries, PercentPoint, PricePoint, PriceSeries};
pub use structs::{ComparisonResult, SummaryStats, TickerSeries};
pub use ticker::Ticker;
