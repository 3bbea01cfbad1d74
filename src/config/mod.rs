pub mod week_start;

use std::{str::FromStr, time::Duration};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;

use crate::{calendar::ViewMode, error::ConfigError};
use week_start::WeekStart;

pub const DEFAULT_API_HOST: &str = "https://automation.getmentore.com";

#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    #[command(subcommand)]
    command: Command,
    /// Timezone used to place posts on calendar days
    #[arg(long, global = true, env = "PLANNER_TIMEZONE", default_value = "UTC")]
    timezone: String,
    /// First day of the week
    #[arg(long, global = true, env = "PLANNER_WEEK_START", default_value = "sunday")]
    week_start: WeekStart,
    /// Host of the token exchange API
    #[arg(long, global = true, env = "EXCHANGE_API_HOST", default_value = DEFAULT_API_HOST)]
    api_host: String,
    /// Token exchange timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,
    /// Retries of a failed token exchange
    #[arg(long, global = true, default_value = "1")]
    retries: u32,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the planned posts in a week or month calendar
    Calendar(CalendarArgs),
    /// Finish connecting an Instagram account from its OAuth redirect
    Connect {
        /// Redirect URL or its query string, e.g. `?code=...`
        redirect: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CalendarArgs {
    #[arg(long, default_value = "month")]
    pub view: ViewMode,
    /// Anchor date [default: today]
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
    /// Move the anchor by whole weeks or months
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub shift: i32,
    /// Seed of the generated posts
    #[arg(long, default_value = "0")]
    pub seed: u64,
    /// Highlight a day
    #[arg(long)]
    pub select: Option<NaiveDate>,
    /// Reschedule a post, e.g. `2024-03-15-1=2024-03-18T09:00:00Z`
    #[arg(long = "move", num_args = 0..)]
    pub reschedule: Vec<Reschedule>,
    /// Delete posts by id
    #[arg(long, num_args = 0..)]
    pub delete: Vec<String>,
    /// Show the details of a post
    #[arg(long)]
    pub show: Option<String>,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    pub const fn command(&self) -> &Command {
        &self.command
    }
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }
    pub const fn week_start(&self) -> WeekStart {
        self.week_start
    }
    pub fn api_host(&self) -> &str {
        self.api_host.trim_end_matches('/')
    }
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
    pub const fn retries(&self) -> u32 {
        self.retries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reschedule {
    pub id: String,
    pub time: DateTime<Utc>,
}

impl FromStr for Reschedule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidReschedule(s.to_string());
        let (id, time) = s.rsplit_once('=').ok_or_else(invalid)?;
        if id.is_empty() {
            return Err(invalid());
        }
        let time = DateTime::parse_from_rfc3339(time).map_err(|_| invalid())?;
        Ok(Self {
            id: id.to_string(),
            time: time.to_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("post-planner").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn calendar_arguments() {
        let config = parse(&[
            "calendar",
            "--view",
            "week",
            "--date",
            "2024-03-15",
            "--shift",
            "-2",
            "--move",
            "2024-03-15-1=2024-03-18T09:00:00+01:00",
            "--delete",
            "a",
            "b",
            "--week-start",
            "monday",
        ]);

        assert_eq!(config.week_start(), WeekStart::Monday);
        let Command::Calendar(args) = config.command() else {
            panic!("expected calendar command");
        };
        assert_eq!(args.view, ViewMode::Week);
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(args.shift, -2);
        assert_eq!(args.delete, ["a", "b"]);
        assert_eq!(args.reschedule[0].id, "2024-03-15-1");
        assert_eq!(args.reschedule[0].time.to_rfc3339(), "2024-03-18T08:00:00+00:00");
    }

    #[test]
    fn connect_arguments() {
        let config = parse(&["connect", "?code=abc", "--api-host", "http://localhost:9000/", "--retries", "0"]);
        assert!(matches!(config.command(), Command::Connect { redirect } if redirect == "?code=abc"));
        assert_eq!(config.api_host(), "http://localhost:9000");
        assert_eq!(config.retries(), 0);
    }

    #[test]
    fn timezone_is_validated() {
        let config = parse(&["calendar", "--timezone", "Europe/Paris"]);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Paris);

        let config = parse(&["calendar", "--timezone", "Mars/Olympus"]);
        assert!(matches!(config.timezone(), Err(ConfigError::UnknownTimezone(_))));
    }

    #[test]
    fn reschedule_requires_id_and_time() {
        assert!("=2024-03-18T09:00:00Z".parse::<Reschedule>().is_err());
        assert!("abc".parse::<Reschedule>().is_err());
        assert!("abc=tomorrow".parse::<Reschedule>().is_err());
    }
}
