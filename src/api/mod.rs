pub mod instagram;

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

use crate::{config::Config, error::ConfigError};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    retries: u32,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_settings(config.timeout(), config.retries())
    }
    pub fn with_settings(timeout: Duration, retries: u32) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, retries })
    }
    fn client(&self) -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.retries);

        ClientBuilder::new(self.client.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}
