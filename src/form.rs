//! The manual-entry form as an explicit value.
//!
//! Every request carries the full form; nothing is remembered between
//! requests. Rows are addressed by position (`date_0`, `consumption_0`, ...)
//! so that changing the day count keeps what was already typed.

use crate::config::{clamp_days, clamp_days_ahead, AppConfig};
use crate::errors::ForecastError;
use crate::models::Sample;
use crate::series::Series;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub days: u32,
    pub days_ahead: u32,
    pub rows: Vec<Sample>,
}

impl FormInput {
    /// Form with `days` rows ending yesterday, each at the default consumption.
    pub fn defaults(today: NaiveDate, days: u32, config: &AppConfig) -> Self {
        let days = clamp_days(days);
        Self {
            days,
            days_ahead: config.default_days_ahead,
            rows: (0..days)
                .map(|index| default_row(today, days, index, config.default_consumption))
                .collect(),
        }
    }

    /// Reads a urlencoded form post.
    ///
    /// Out-of-range numbers are clamped the way the input widgets clamp them;
    /// missing or blank rows take their positional defaults. Text that does
    /// not parse at all is rejected.
    pub fn from_pairs(
        pairs: &[(String, String)],
        today: NaiveDate,
        config: &AppConfig,
    ) -> Result<Self, ForecastError> {
        let fields: HashMap<&str, &str> = pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        let days = match fields.get("days") {
            Some(raw) => clamp_days(parse_count(raw, "days")?),
            None => config.default_days,
        };
        let days_ahead = match fields.get("days_ahead") {
            Some(raw) => clamp_days_ahead(parse_count(raw, "days_ahead")?),
            None => config.default_days_ahead,
        };

        let mut rows = Vec::with_capacity(days as usize);
        for index in 0..days {
            let default = default_row(today, days, index, config.default_consumption);

            let date_key = format!("date_{index}");
            let date = match fields.get(date_key.as_str()) {
                Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| invalid_field(&date_key, raw))?,
                None => default.date,
            };

            let consumption_key = format!("consumption_{index}");
            let consumption = match fields.get(consumption_key.as_str()) {
                Some(raw) => {
                    let value: f64 = raw
                        .parse()
                        .map_err(|_| invalid_field(&consumption_key, raw))?;
                    if !value.is_finite() {
                        return Err(invalid_field(&consumption_key, raw));
                    }
                    value.max(0.0)
                }
                None => default.consumption,
            };

            rows.push(Sample::new(date, consumption));
        }

        Ok(Self {
            days,
            days_ahead,
            rows,
        })
    }

    pub fn to_series(&self) -> Result<Series, ForecastError> {
        Series::new(self.rows.clone())
    }
}

/// Row `index` of a `days`-row form defaults to `today - (days - index)`.
fn default_row(today: NaiveDate, days: u32, index: u32, consumption: f64) -> Sample {
    let date = today
        .checked_sub_days(Days::new(u64::from(days - index)))
        .unwrap_or(NaiveDate::MIN);
    Sample::new(date, consumption)
}

fn parse_count(raw: &str, field: &str) -> Result<u32, ForecastError> {
    let value: i64 = raw.parse().map_err(|_| invalid_field(field, raw))?;
    Ok(value.clamp(0, i64::from(u32::MAX)) as u32)
}

fn invalid_field(field: &str, value: &str) -> ForecastError {
    ForecastError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    }
}
