pub mod display;

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, TimeDelta};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use crate::config::week_start::WeekStart;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    #[default]
    Month,
}

impl ViewMode {
    /// Number of cells the view renders.
    pub const fn cells(&self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 42,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

/// The dates of the calendar cells for `view` around `anchor`.
///
/// Week view is the 7 days of the week containing `anchor`. Month view is 6
/// full weeks starting on the week that contains the first of the month, so
/// the leading and trailing cells belong to the adjacent months.
///
/// Returns `None` when a cell would fall outside chrono's date range.
pub fn generate_range(
    view: ViewMode,
    anchor: NaiveDate,
    week_start: WeekStart,
) -> Option<Vec<NaiveDate>> {
    let start = match view {
        ViewMode::Week => start_of_week(anchor, week_start)?,
        ViewMode::Month => start_of_week(start_of_month(anchor)?, week_start)?,
    };
    let cells = view.cells();
    start.checked_add_days(Days::new(cells as u64 - 1))?;
    Some(start.iter_days().take(cells).collect())
}

pub fn start_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.day0())))
}

pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(week_start.offset(date.weekday()))))
}

pub fn is_same_month(date: NaiveDate, anchor: NaiveDate) -> bool {
    date.year() == anchor.year() && date.month() == anchor.month()
}

/// Column headers, starting on `week_start`.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    const SUNDAY_FIRST: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let mut labels = SUNDAY_FIRST;
    labels.rotate_left(week_start.weekday().num_days_from_sunday() as usize);
    labels
}

/// Move `anchor` by whole weeks or whole months.
///
/// Month steps clamp the day to the length of the target month. Returns
/// `None` when the result is out of chrono's range.
pub fn shift_anchor(view: ViewMode, anchor: NaiveDate, steps: i32) -> Option<NaiveDate> {
    match view {
        ViewMode::Week => anchor.checked_add_signed(TimeDelta::try_weeks(i64::from(steps))?),
        ViewMode::Month if steps >= 0 => anchor.checked_add_months(Months::new(steps.unsigned_abs())),
        ViewMode::Month => anchor.checked_sub_months(Months::new(steps.unsigned_abs())),
    }
}
