use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single closing price observation for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// An ordered series of closing prices with strictly increasing dates.
///
/// The series may be empty (unknown ticker, empty date range). Once built it
/// is immutable; the only way to obtain one is through [`PriceSeries::new`],
/// which enforces the ordering invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from observations in any order.
    ///
    /// Points are sorted by date. Two observations for the same date are
    /// rejected, since the day-over-day return between them is meaningless.
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, CoreError> {
        points.sort_by_key(|p| p.date);
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CoreError::InvalidInput(
                "price series".to_string(),
                format!("duplicate observation for {}", pair[0].date),
            ));
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = CoreError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// The cumulative percent change of a series on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub percent_change: Decimal,
}

/// A price series re-expressed as compounded percent change from its first date.
///
/// Shares its dates with the source `PriceSeries`. The first point is always
/// zero; an empty source yields an empty series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedSeries {
    points: Vec<PercentPoint>,
}

impl NormalizedSeries {
    pub fn new(points: Vec<PercentPoint>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PercentPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The percent-change values without their dates.
    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.percent_change).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn new_sorts_points_by_date() {
        let series = PriceSeries::new(vec![
            PricePoint::new(day(5), dec!(12)),
            PricePoint::new(day(4), dec!(11)),
        ])
        .unwrap();

        assert_eq!(series.first().unwrap().date, day(4));
        let prices: Vec<_> = series.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![dec!(11), dec!(12)]);
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let result = PriceSeries::new(vec![
            PricePoint::new(day(4), dec!(11)),
            PricePoint::new(day(4), dec!(12)),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidInput(_, _))));
    }

    #[test]
    fn price_series_serializes_as_list_of_numbers() {
        let series = PriceSeries::new(vec![PricePoint::new(day(4), dec!(101.5))]).unwrap();
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json, serde_json::json!([{ "date": "2024-03-04", "price": 101.5 }]));
    }
}
