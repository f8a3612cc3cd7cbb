use crate::chart::render_chart;
use crate::errors::ForecastError;
use crate::forecast::{fit, future_offset};
use crate::models::{ForecastResponse, Prediction, TableRow};
use crate::series::Series;
use chrono::Days;
use tracing::debug;

/// Runs one full recomputation over a validated series: fit the trend,
/// project it `days_ahead` past the last sample and lay out table and chart.
pub fn build_report(series: &Series, days_ahead: u32) -> Result<ForecastResponse, ForecastError> {
    let model = fit(series.samples())?;

    let min_date = series.min_date();
    let max_date = series.max_date();
    let target_date = max_date
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .ok_or(ForecastError::DateOutOfRange {
            date: max_date,
            days: days_ahead,
        })?;
    let target_offset = future_offset(min_date, max_date, days_ahead);
    let value = model.predict(target_offset);
    if !(value.is_finite() && model.slope.is_finite() && model.intercept.is_finite()) {
        return Err(ForecastError::ForecastOverflow { value });
    }

    debug!(
        slope = model.slope,
        intercept = model.intercept,
        samples = series.len(),
        target_offset,
        value,
        "fitted trend"
    );

    let prediction = Prediction {
        target_date,
        target_offset,
        value,
        label: format!(
            "Estimated energy consumption on {}: {value:.2} kWh",
            target_date.format("%Y-%m-%d")
        ),
    };

    let table = series
        .samples()
        .iter()
        .zip(series.offsets())
        .map(|(sample, day_offset)| TableRow {
            date: sample.date,
            consumption: sample.consumption,
            day_offset,
        })
        .collect();

    let chart_svg = render_chart(series, &model, &prediction);

    Ok(ForecastResponse {
        table,
        model,
        prediction,
        chart_svg,
    })
}
