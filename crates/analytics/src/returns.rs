use crate::error::AnalyticsError;
use core_types::PriceSeries;
use rust_decimal::Decimal;

/// Day-over-day fractional returns, `price[i] / price[i-1] - 1` for `i >= 1`.
///
/// The result has one element fewer than the series (none for a series with
/// fewer than two points). A zero price followed by another observation makes
/// the next return undefined and is reported as `AnalyticsError::Computation`.
pub fn daily_returns(series: &PriceSeries) -> Result<Vec<Decimal>, AnalyticsError> {
    series
        .points()
        .windows(2)
        .map(|w| {
            let (prev, curr) = (&w[0], &w[1]);
            let ratio = curr.price.checked_div(prev.price).ok_or_else(|| {
                AnalyticsError::Computation(format!(
                    "price on {} is {}, return for {} is undefined",
                    prev.date, prev.price, curr.date
                ))
            })?;
            ratio.checked_sub(Decimal::ONE).ok_or_else(|| {
                AnalyticsError::Computation(format!("return for {} overflowed", curr.date))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::PricePoint;
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(start + chrono::Days::new(i as u64), *p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn returns_are_fractional_changes() {
        let r = daily_returns(&series(&[dec!(100), dec!(110), dec!(99)])).unwrap();
        assert_eq!(r, vec![dec!(0.1), dec!(-0.1)]);
    }

    #[test]
    fn short_series_have_no_returns() {
        assert!(daily_returns(&series(&[])).unwrap().is_empty());
        assert!(daily_returns(&series(&[dec!(5)])).unwrap().is_empty());
    }

    #[test]
    fn zero_price_before_a_division_is_an_error() {
        let err = daily_returns(&series(&[dec!(10), dec!(0), dec!(5)])).unwrap_err();
        assert!(matches!(err, AnalyticsError::Computation(_)));

        // A trailing zero is fine: nothing divides by it.
        let r = daily_returns(&series(&[dec!(10), dec!(0)])).unwrap();
        assert_eq!(r, vec![dec!(-1)]);
    }
}
