use crate::series::{MAX_DAYS, MAX_DAYS_AHEAD, MIN_DAYS, MIN_DAYS_AHEAD};
use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DAYS: u32 = 7;
pub const DEFAULT_CONSUMPTION: f64 = 100.0;
pub const DEFAULT_DAYS_AHEAD: u32 = 3;

/// Server settings and the values the form starts out with.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub default_days: u32,
    pub default_consumption: f64,
    pub default_days_ahead: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_days: DEFAULT_DAYS,
            default_consumption: DEFAULT_CONSUMPTION,
            default_days_ahead: DEFAULT_DAYS_AHEAD,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let default_consumption = parse_or(&lookup, "FORECAST_DEFAULT_CONSUMPTION", defaults.default_consumption);

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            default_days: clamp_days(parse_or(&lookup, "FORECAST_DEFAULT_DAYS", defaults.default_days)),
            default_consumption: if default_consumption.is_finite() && default_consumption >= 0.0 {
                default_consumption
            } else {
                warn!(value = default_consumption, "ignoring FORECAST_DEFAULT_CONSUMPTION");
                defaults.default_consumption
            },
            default_days_ahead: clamp_days_ahead(parse_or(
                &lookup,
                "FORECAST_DEFAULT_DAYS_AHEAD",
                defaults.default_days_ahead,
            )),
        }
    }
}

pub fn clamp_days(days: u32) -> u32 {
    days.clamp(MIN_DAYS as u32, MAX_DAYS as u32)
}

pub fn clamp_days_ahead(days_ahead: u32) -> u32 {
    days_ahead.clamp(MIN_DAYS_AHEAD, MAX_DAYS_AHEAD)
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = raw.as_str(), "ignoring unparseable setting");
            default
        }),
        None => default,
    }
}
