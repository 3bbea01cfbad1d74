use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{
    api::{instagram::InstagramClient, ApiClient},
    calendar::WeekStart,
    config::Config,
    error::ConfigError,
};

/// Shared state of a run, built once from the configuration.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub timezone: Tz,
    pub week_start: WeekStart,
    pub instagram: InstagramClient,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api = ApiClient::new(config)?;
        Ok(Self {
            timezone: config.timezone()?,
            week_start: config.week_start(),
            instagram: InstagramClient::new(api, config.api_host()),
        })
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}
