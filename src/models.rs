use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of manually entered consumption, in kWh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub consumption: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, consumption: f64) -> Self {
        Self { date, consumption }
    }
}

/// Least-squares line `consumption = slope * day_offset + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub samples: Vec<Sample>,
    pub days_ahead: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub date: NaiveDate,
    pub consumption: f64,
    pub day_offset: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub target_date: NaiveDate,
    pub target_offset: i64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub table: Vec<TableRow>,
    pub model: TrendModel,
    pub prediction: Prediction,
    pub chart_svg: String,
}

#[derive(Debug, Deserialize)]
pub struct DefaultsQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsResponse {
    pub days: u32,
    pub days_ahead: u32,
    pub samples: Vec<Sample>,
}
