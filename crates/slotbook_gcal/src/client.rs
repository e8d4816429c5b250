// --- File: crates/slotbook_gcal/src/client.rs ---
//! Lazily initialized entry point to the Google Calendar integration.

use crate::auth::GcalSession;
use crate::logic::{self, FreeSlot, GcalError, WorkingWindow};
use crate::service::GoogleCalendarService;
use chrono::NaiveDate;
use slotbook_common::BookingRequest;
use slotbook_config::{AppConfig, GcalConfig};
use tokio::sync::OnceCell;
use tracing::debug;

/// Owns the Google session for one calendar and the working window used for it.
///
/// The session is created on first use and then shared; concurrent first
/// callers all wait on the same initialization.
pub struct GcalClient {
    config: GcalConfig,
    window: WorkingWindow,
    session: OnceCell<GcalSession>,
}

impl GcalClient {
    pub fn new(config: GcalConfig, window: WorkingWindow) -> Self {
        Self {
            config,
            window,
            session: OnceCell::new(),
        }
    }

    /// Builds a client from the app config; fails if GCal is disabled or unconfigured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GcalError> {
        if !config.use_gcal {
            return Err(GcalError::Config("GCal service is disabled.".to_string()));
        }
        let gcal_config = config
            .gcal
            .clone()
            .ok_or_else(|| GcalError::Config("GCal config missing".to_string()))?;
        let window = WorkingWindow::from_config(&config.availability)?;
        Ok(Self::new(gcal_config, window))
    }

    pub fn window(&self) -> &WorkingWindow {
        &self.window
    }

    pub fn calendar_id(&self) -> &str {
        &self.config.calendar_id
    }

    pub fn is_initialized(&self) -> bool {
        self.session.initialized()
    }

    /// The ready session, initializing it exactly once.
    pub async fn session(&self) -> Result<&GcalSession, GcalError> {
        self.session
            .get_or_try_init(|| async {
                debug!("First GCal call, initializing session");
                GcalSession::initialize(&self.config).await
            })
            .await
    }

    async fn service(&self) -> Result<GoogleCalendarService, GcalError> {
        let session = self.session().await?;
        Ok(GoogleCalendarService::new(session.hub()))
    }

    /// Free slots of `date` in the configured calendar.
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<FreeSlot>, GcalError> {
        let service = self.service().await?;
        logic::available_slots(&service, &self.config.calendar_id, date, &self.window).await
    }

    /// Books `request` in the configured calendar and returns the event id.
    pub async fn create_event(&self, request: BookingRequest) -> Result<String, GcalError> {
        let service = self.service().await?;
        logic::book_slot(&service, &self.config.calendar_id, request).await
    }
}
