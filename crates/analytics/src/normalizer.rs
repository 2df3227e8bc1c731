use crate::error::AnalyticsError;
use crate::returns::daily_returns;
use core_types::{NormalizedSeries, PercentPoint, PriceSeries};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Converts a price series into its cumulative percent change.
///
/// The first date is the anchor and is always `0`. Each later point is the
/// compounded product of every daily growth factor up to that date, so
/// `percent_change[i] = (prod(1 + r[j]) - 1) * 100`. Values are left
/// unrounded; rounding is a presentation concern.
///
/// An empty series yields an empty result.
pub fn normalize(series: &PriceSeries) -> Result<NormalizedSeries, AnalyticsError> {
    let Some(first) = series.first() else {
        return Ok(NormalizedSeries::empty());
    };

    let returns = daily_returns(series)?;

    let mut points = Vec::with_capacity(series.len());
    points.push(PercentPoint {
        date: first.date,
        percent_change: Decimal::ZERO,
    });

    let mut growth = Decimal::ONE;
    for (point, r) in series.points().iter().skip(1).zip(returns) {
        let overflow = || {
            AnalyticsError::Computation(format!("cumulative return overflowed on {}", point.date))
        };
        growth = Decimal::ONE
            .checked_add(r)
            .and_then(|factor| growth.checked_mul(factor))
            .ok_or_else(overflow)?;
        let percent_change = growth
            .checked_sub(Decimal::ONE)
            .and_then(|gain| gain.checked_mul(HUNDRED))
            .ok_or_else(overflow)?;
        points.push(PercentPoint {
            date: point.date,
            percent_change,
        });
    }

    Ok(NormalizedSeries::new(points))
}
