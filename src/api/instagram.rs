use log::{debug, log_enabled, trace};
use reqwest::header;
use reqwest_middleware::RequestBuilder;
use serde_json::Value;

use crate::error::ConnectError;

use super::ApiClient;

#[derive(Debug, Clone)]
pub struct InstagramClient {
    inner: ApiClient,
    host: String,
}

impl InstagramClient {
    pub fn new(inner: ApiClient, host: &str) -> Self {
        let host = host.trim_end_matches('/').to_string();
        Self { inner, host }
    }

    fn wrap_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(header::ACCEPT, "application/json")
    }

    /// Trade an OAuth authorization code for an access token.
    ///
    /// The token is not kept. Only the `error` field of the answer matters.
    pub async fn exchange_token(&self, code: &str) -> Result<ExchangeResponse, ConnectError> {
        let url = format!(
            "{}/api/exchangeToken?code={}",
            self.host,
            urlencoding::encode(code)
        );
        let request = self.wrap_request(self.inner.client().get(&url));

        debug!("GET {}/api/exchangeToken", self.host);
        let response = request.send().await?;
        let body: Value = response
            .json()
            .await
            .map_err(ConnectError::InvalidResponse)?;

        if log_enabled!(log::Level::Trace) {
            trace!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
        }

        let response = ExchangeResponse(body);
        match response.error() {
            Some(error) => Err(ConnectError::Rejected(error)),
            None => Ok(response),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeResponse(pub Value);

impl ExchangeResponse {
    /// The `error` reported by the API, ignoring empty values like `null`,
    /// `false`, `0` or `""`.
    pub fn error(&self) -> Option<String> {
        match self.0.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
