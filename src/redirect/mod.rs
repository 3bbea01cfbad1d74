pub mod notification;

use log::{debug, error, info};
use url::{form_urlencoded, Url};

use crate::{api::instagram::ExchangeResponse, context::AppContext, error::ConnectError};
use notification::Notification;

/// Where the user lands after connecting, whatever happened.
pub const FALLBACK_ROUTE: &str = "/connect-social";

const CONNECTED: &str = "Successfully connected to Instagram!";
const NOT_CONNECTED: &str = "Social not connected. Please try again.";

#[derive(Debug)]
pub struct RedirectOutcome {
    pub notification: Notification,
    pub route: &'static str,
    pub result: Result<ExchangeResponse, ConnectError>,
}

impl RedirectOutcome {
    pub const fn connected(&self) -> bool {
        self.result.is_ok()
    }
}

/// The `code` query parameter of an OAuth redirect.
///
/// Accepts a full URL, a query string with or without its leading `?`, or
/// anything in between. An empty code counts as missing.
pub fn authorization_code(redirect: &str) -> Option<String> {
    let query = match Url::parse(redirect) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => {
            let query = redirect.split_once('?').map_or(redirect, |(_, query)| query);
            query.split('#').next().unwrap_or_default().to_string()
        }
    };

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, code)| code.into_owned())
        .filter(|code| !code.is_empty())
}

pub async fn handle_redirect(ctx: &AppContext, redirect: &str) -> RedirectOutcome {
    info!("Connecting to Instagram...");
    let result = connect(ctx, redirect).await;

    let notification = match &result {
        Ok(_) => Notification::success(CONNECTED),
        Err(e) => {
            error!("{}", e);
            Notification::failure(NOT_CONNECTED)
        }
    };

    RedirectOutcome {
        notification,
        route: FALLBACK_ROUTE,
        result,
    }
}

async fn connect(ctx: &AppContext, redirect: &str) -> Result<ExchangeResponse, ConnectError> {
    let code = authorization_code(redirect).ok_or(ConnectError::MissingCode)?;
    debug!("code {}", code);
    ctx.instagram.exchange_token(&code).await
}
