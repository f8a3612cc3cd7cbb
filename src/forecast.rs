//! Linear trend fitting over "days since the first sample".

use crate::errors::ForecastError;
use crate::models::{Sample, TrendModel};
use chrono::NaiveDate;

/// Whole calendar days from `min_date` to `date`.
pub fn day_offset(min_date: NaiveDate, date: NaiveDate) -> i64 {
    (date - min_date).num_days()
}

/// Fits consumption against day offset by ordinary least squares.
///
/// Samples need not be sorted and may share dates. When every sample falls on
/// the same date the slope is undefined, so the model degrades to a flat line
/// through the mean consumption.
pub fn fit(samples: &[Sample]) -> Result<TrendModel, ForecastError> {
    let min_date = samples
        .iter()
        .map(|sample| sample.date)
        .min()
        .ok_or(ForecastError::EmptySeries)?;

    let n = samples.len() as f64;
    let xs: Vec<f64> = samples
        .iter()
        .map(|sample| day_offset(min_date, sample.date) as f64)
        .collect();
    let x_mean = xs.iter().sum::<f64>() / n;

    // Consumption is fitted in units of its largest magnitude so that the sums
    // stay finite for values near f64::MAX.
    let scale = samples
        .iter()
        .map(|sample| sample.consumption.abs())
        .fold(0.0_f64, f64::max);
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let ys: Vec<f64> = samples
        .iter()
        .map(|sample| sample.consumption / scale)
        .collect();

    let mut y_mean = 0.0;
    for (k, y) in ys.iter().enumerate() {
        y_mean += (y - y_mean) / (k + 1) as f64;
    }

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        numerator += (x - x_mean) * (y - y_mean);
        denominator += (x - x_mean) * (x - x_mean);
    }

    // Offsets are integers, so the spread is exactly zero only for a single date.
    if denominator == 0.0 {
        return Ok(TrendModel {
            slope: 0.0,
            intercept: y_mean * scale,
        });
    }

    let slope = numerator / denominator;
    Ok(TrendModel {
        slope: slope * scale,
        intercept: (y_mean - slope * x_mean) * scale,
    })
}

/// Evaluates the trend line at `target_offset`. Negative results are kept as is.
pub fn predict(model: &TrendModel, target_offset: i64) -> f64 {
    model.slope * target_offset as f64 + model.intercept
}

pub fn future_offset(min_date: NaiveDate, max_date: NaiveDate, days_ahead: u32) -> i64 {
    day_offset(min_date, max_date) + i64::from(days_ahead)
}

impl TrendModel {
    pub fn predict(&self, target_offset: i64) -> f64 {
        predict(self, target_offset)
    }
}
