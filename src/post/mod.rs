pub mod index;
pub mod source;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub use index::PostIndex;
pub use source::{DummySource, PostSource};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub scheduled_time: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl Post {
    /// The calendar day this post is bucketed under in `tz`.
    pub fn date_key(&self, tz: &Tz) -> DateKey {
        DateKey::from_timestamp(&self.scheduled_time, tz)
    }

    /// Scheduled time as shown on a post card, e.g. `9:05 AM`.
    pub fn display_time(&self, tz: &Tz) -> String {
        self.scheduled_time
            .with_timezone(tz)
            .format("%-I:%M %p")
            .to_string()
    }

    pub fn reschedule(self, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            scheduled_time,
            ..self
        }
    }
}

/// A calendar day, formatted as `yyyy-MM-dd`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_timestamp(timestamp: &DateTime<Utc>, tz: &Tz) -> Self {
        Self(timestamp.with_timezone(tz).date_naive())
    }

    #[cfg(test)]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
