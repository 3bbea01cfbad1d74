use std::fmt;

use chrono::Weekday;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub const fn weekday(&self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
    /// Zero-based column of `day` in a week starting on `self`.
    pub fn offset(&self, day: Weekday) -> u32 {
        match self {
            Self::Sunday => day.num_days_from_sunday(),
            Self::Monday => day.num_days_from_monday(),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}
