use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while turning user input into a forecast.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("cannot fit a trend to an empty series")]
    EmptySeries,

    #[error("expected between {min} and {max} days of data, got {actual}")]
    SampleCount { min: usize, max: usize, actual: usize },

    #[error("consumption for day {} must be a non-negative number, got {value}", .index + 1)]
    InvalidConsumption { index: usize, value: f64 },

    #[error("days ahead must be between {min} and {max}, got {actual}")]
    DaysAhead { min: u32, max: u32, actual: u32 },

    #[error("invalid value for field '{field}': {value:?}")]
    InvalidField { field: String, value: String },

    #[error("forecast of {value} kWh is outside the representable range")]
    ForecastOverflow { value: f64 },

    #[error("date {date} plus {days} days is out of range")]
    DateOutOfRange { date: NaiveDate, days: u32 },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status().is_server_error() {
            Self::internal(rejection.body_text())
        } else {
            Self::bad_request(rejection.body_text())
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
