// --- File: crates/services/slotbook_cli/src/app_state.rs ---
use slotbook_api::{ApiClient, CalendarStore, HttpCalendarApi, TokenStore};
use slotbook_common::{external_service_error, SlotbookError};
use slotbook_config::AppConfig;
use std::sync::Arc;
#[cfg(feature = "gcal")]
use tracing::debug;

#[cfg(feature = "gcal")]
use slotbook_gcal::GcalClient;

/// Everything a command needs: config, the backend store and, when
/// configured, a direct Google Calendar client.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: CalendarStore<HttpCalendarApi>,
    had_token: bool,

    #[cfg(feature = "gcal")]
    pub gcal: Option<GcalClient>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, SlotbookError> {
        let tokens = TokenStore::new(config.api.token.clone());
        let had_token = tokens.is_authenticated();
        let client = ApiClient::new(&config.api, tokens)?;
        let store = CalendarStore::new(HttpCalendarApi::new(client));

        #[cfg(feature = "gcal")]
        let gcal = match GcalClient::from_app_config(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                debug!("Direct Google Calendar access unavailable: {}", e);
                None
            }
        };

        Ok(Self {
            config,
            store,
            had_token,
            #[cfg(feature = "gcal")]
            gcal,
        })
    }

    pub fn api_client(&self) -> &ApiClient {
        self.store.api().client()
    }

    #[cfg(feature = "gcal")]
    pub fn gcal(&self) -> Result<&GcalClient, SlotbookError> {
        self.gcal.as_ref().ok_or_else(|| {
            SlotbookError::ConfigError(
                "direct mode needs use_gcal = true and a [gcal] section".to_string(),
            )
        })
    }

    /// Turns the error the last store action recorded into a command failure.
    ///
    /// The client drops the token on a 401, so a token that was configured
    /// but is gone now means the backend rejected the session.
    pub fn check_store(&self) -> Result<(), SlotbookError> {
        let Some(message) = &self.store.state().error else {
            return Ok(());
        };
        if self.had_token && !self.api_client().tokens().is_authenticated() {
            return Err(SlotbookError::AuthError(format!(
                "{}: session expired, please log in again",
                message
            )));
        }
        Err(external_service_error("backend", message))
    }
}
