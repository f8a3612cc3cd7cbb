use crate::errors::ForecastError;
use crate::forecast::day_offset;
use crate::models::Sample;
use chrono::NaiveDate;

pub const MIN_DAYS: usize = 3;
pub const MAX_DAYS: usize = 30;
pub const MIN_DAYS_AHEAD: u32 = 1;
pub const MAX_DAYS_AHEAD: u32 = 14;

/// Validated samples, sorted ascending by date.
///
/// Samples sharing a date are kept, in the order they were entered.
#[derive(Debug, Clone)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(mut samples: Vec<Sample>) -> Result<Self, ForecastError> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&samples.len()) {
            return Err(ForecastError::SampleCount {
                min: MIN_DAYS,
                max: MAX_DAYS,
                actual: samples.len(),
            });
        }

        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, sample)| !sample.consumption.is_finite() || sample.consumption < 0.0)
        {
            return Err(ForecastError::InvalidConsumption {
                index,
                value: sample.consumption,
            });
        }

        samples.sort_by_key(|sample| sample.date);
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.samples[0].date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.samples[self.samples.len() - 1].date
    }

    /// Day offset of every sample relative to the earliest date.
    pub fn offsets(&self) -> impl Iterator<Item = i64> + '_ {
        let min_date = self.min_date();
        self.samples
            .iter()
            .map(move |sample| day_offset(min_date, sample.date))
    }
}

pub fn validate_days_ahead(days_ahead: u32) -> Result<u32, ForecastError> {
    if (MIN_DAYS_AHEAD..=MAX_DAYS_AHEAD).contains(&days_ahead) {
        Ok(days_ahead)
    } else {
        Err(ForecastError::DaysAhead {
            min: MIN_DAYS_AHEAD,
            max: MAX_DAYS_AHEAD,
            actual: days_ahead,
        })
    }
}
