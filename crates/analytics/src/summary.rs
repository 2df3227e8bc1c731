use crate::error::AnalyticsError;
use crate::returns::daily_returns;
use core_types::{PriceSeries, SummaryStats, Ticker};
use rust_decimal::prelude::*;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Computes the summary metrics of one ticker's raw price series.
///
/// The average and standard deviation are taken over day-over-day returns.
/// They are `0` when there are too few points for the statistic to exist
/// (fewer than one return for the mean, fewer than two for the sample
/// standard deviation). All four values are rounded to two decimal places
/// once every other step is done.
pub fn summarize(series: &PriceSeries, ticker: &Ticker) -> Result<SummaryStats, AnalyticsError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.price, last.price),
        _ => {
            return Err(AnalyticsError::InsufficientData(format!(
                "no prices for {}",
                ticker
            )));
        }
    };

    let total_change = last
        .checked_sub(first)
        .ok_or_else(|| overflow(ticker, "total change"))?;
    let ratio = last.checked_div(first).ok_or_else(|| {
        AnalyticsError::Computation(format!("first price of {} is zero", ticker))
    })?;
    let total_percent_change = to_percent(ratio.checked_sub(Decimal::ONE))
        .ok_or_else(|| overflow(ticker, "total percent change"))?;

    let returns = daily_returns(series)?;
    let mean = mean(&returns).ok_or_else(|| overflow(ticker, "mean daily return"))?;
    let std_dev = sample_std_dev(&returns, mean)?;

    let avg_daily_change_percent =
        to_percent(Some(mean)).ok_or_else(|| overflow(ticker, "average daily change"))?;
    let std_daily_change_percent =
        to_percent(Some(std_dev)).ok_or_else(|| overflow(ticker, "daily change deviation"))?;

    tracing::debug!(
        %ticker,
        points = series.len(),
        "Summarized price series."
    );

    Ok(SummaryStats {
        ticker: ticker.clone(),
        total_change: round2(total_change),
        total_percent_change: round2(total_percent_change),
        avg_daily_change_percent: round2(avg_daily_change_percent),
        std_daily_change_percent: round2(std_daily_change_percent),
    })
}

fn overflow(ticker: &Ticker, what: &str) -> AnalyticsError {
    AnalyticsError::Computation(format!("{} of {} overflowed", what, ticker))
}

fn to_percent(fraction: Option<Decimal>) -> Option<Decimal> {
    fraction?.checked_mul(HUNDRED)
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// `None` when the sum overflows.
fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return Some(Decimal::ZERO);
    }
    checked_sum(values.iter().copied())?.checked_div(Decimal::from(values.len()))
}

/// Sample standard deviation with an `N - 1` denominator.
fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Result<Decimal, AnalyticsError> {
    if values.len() < 2 {
        return Ok(Decimal::ZERO);
    }

    let squares = values.iter().map(|r| {
        let deviation = r.checked_sub(mean)?;
        deviation.checked_mul(deviation)
    });
    let variance = squares
        .collect::<Option<Vec<_>>>()
        .and_then(checked_sum)
        .and_then(|total| total.checked_div(Decimal::from(values.len() - 1)))
        .ok_or_else(|| {
            AnalyticsError::Computation("variance of daily returns overflowed".to_string())
        })?;

    variance.sqrt().ok_or_else(|| {
        AnalyticsError::Computation(format!("failed to take square root of variance {}", variance))
    })
}

/// Rounds half away from zero and drops a negative sign on zero.
fn round2(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
