// File: crates/slotbook_gcal/src/auth.rs
use crate::logic::GcalError;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{self, read_service_account_key, ServiceAccountAuthenticator},
    CalendarHub,
};
use slotbook_common::services::{BoxFuture, TokenProvider};
use slotbook_config::GcalConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;
pub type AuthenticatorType = yup_oauth2::authenticator::Authenticator<Connector>;

/// Read events to compute availability, write events to book.
pub const CALENDAR_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar.events.readonly",
    "https://www.googleapis.com/auth/calendar.events",
];

pub async fn create_authenticator(config: &GcalConfig) -> Result<AuthenticatorType, GcalError> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| GcalError::Config("Missing key_path in GcalConfig".to_string()))?;

    let sa_key = read_service_account_key(Path::new(key_path))
        .await
        .map_err(|e| GcalError::Config(format!("cannot read {}: {}", key_path, e)))?;

    ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|e| GcalError::Auth(e.to_string()))
}

pub fn create_calendar_hub(auth: AuthenticatorType) -> Result<HubType, GcalError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| GcalError::Config(format!("no native TLS roots: {}", e)))?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    Ok(CalendarHub::new(client, auth))
}

/// An authenticated Google Calendar session.
///
/// Constructed once by [`GcalSession::initialize`]; holding one means the
/// credentials were loaded and a token was obtained. Clone the hub out of it
/// for each service call.
pub struct GcalSession {
    hub: Arc<HubType>,
    authenticator: AuthenticatorType,
}

impl GcalSession {
    pub async fn initialize(config: &GcalConfig) -> Result<Self, GcalError> {
        debug!("Initializing Google Calendar session");
        let authenticator = create_authenticator(config).await?;
        let hub = create_calendar_hub(authenticator.clone())?;
        let session = Self {
            hub: Arc::new(hub),
            authenticator,
        };

        // Fail at startup rather than on the first calendar call
        session.access_token().await?;
        info!("Google Calendar session ready");
        Ok(session)
    }

    pub fn hub(&self) -> Arc<HubType> {
        self.hub.clone()
    }

    /// A bearer token for [`CALENDAR_SCOPES`], refreshed by the authenticator when stale.
    pub async fn access_token(&self) -> Result<String, GcalError> {
        let token = self
            .authenticator
            .token(CALENDAR_SCOPES)
            .await
            .map_err(|e| GcalError::Auth(format!("Token error: {}", e)))?;

        match token.token() {
            Some(value) => Ok(value.to_string()),
            None => Err(GcalError::Auth("No token available".to_string())),
        }
    }
}

impl TokenProvider for GcalSession {
    type Error = GcalError;

    fn access_token(&self) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(GcalSession::access_token(self))
    }
}
