//! Time slots offered in the schedule step.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::i18n::Translate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Morning, Period::Afternoon];

    pub fn key(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub period: Period,
    pub label: String,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, period: Period, translator: &dyn Translate) -> Self {
        let label = format!(
            "{} - {}",
            date.format("%d/%m/%Y"),
            translator.translate(&format!("schedule.{}", period.key()))
        );
        Self {
            date,
            period,
            label,
        }
    }
}

/// Lists morning and afternoon slots for the `days` days following `from`.
///
/// Sundays are closed; `from` itself is never offered.
pub fn available_slots(from: NaiveDate, days: u32, translator: &dyn Translate) -> Vec<TimeSlot> {
    (1..=i64::from(days))
        .map(|offset| from + Duration::days(offset))
        .filter(|date| date.weekday() != Weekday::Sun)
        .flat_map(|date| {
            Period::ALL
                .into_iter()
                .map(move |period| TimeSlot::new(date, period, translator))
        })
        .collect()
}
