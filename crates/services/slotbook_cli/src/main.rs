// File: services/slotbook_cli/src/main.rs
mod app_state;
mod cli;


use app_state::AppState;
use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use serde_json::json;
use slotbook_api::{normalize_date, BookEventRequest};
use slotbook_common::{
    log_error, logging, parse_level, validation_error, BookingRequest, SlotbookError,
};
use slotbook_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), SlotbookError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_instant(value: &str, flag: &str) -> Result<DateTime<Utc>, SlotbookError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| validation_error(format!("--{} '{}': {}", flag, value, e)))
}

#[cfg(not(feature = "gcal"))]
fn direct_unavailable() -> SlotbookError {
    SlotbookError::ConfigError("built without the gcal feature".to_string())
}

async fn run(command: Command, state: &mut AppState) -> Result<(), SlotbookError> {
    match command {
        Command::Status => {
            state.store.check_connection().await;
            state.check_store()?;
            let s = state.store.state();
            print_json(&json!({ "connected": s.is_connected, "expires_at": s.expires_at }))
        }
        Command::ConnectUrl => {
            let url = state.store.get_connect_url().await;
            state.check_store()?;
            print_json(&json!({ "url": url }))
        }
        Command::Callback { code } => {
            state.store.handle_google_callback(&code).await;
            state.check_store()?;
            info!("Google Calendar connected");
            print_json(&json!({ "connected": true }))
        }
        Command::Disconnect => {
            state.store.disconnect_google().await;
            state.check_store()?;
            print_json(&json!({ "connected": false }))
        }
        Command::Slots { date, direct } => {
            if direct {
                #[cfg(feature = "gcal")]
                {
                    let day = normalize_date(&date)?;
                    let slots = state.gcal()?.available_slots(day).await?;
                    return print_json(&slots);
                }
                #[cfg(not(feature = "gcal"))]
                return Err(direct_unavailable());
            }
            state.store.get_available_slots(&date).await;
            state.check_store()?;
            print_json(&state.store.formatted_available_slots())
        }
        Command::Book {
            start,
            end,
            summary,
            description,
            attendees,
            direct,
        } => {
            let request = BookingRequest {
                summary,
                description,
                start: parse_instant(&start, "start")?,
                end: parse_instant(&end, "end")?,
                attendees,
            };
            request.interval().map_err(validation_error)?;

            if direct {
                #[cfg(feature = "gcal")]
                {
                    let event_id = state.gcal()?.create_event(request).await?;
                    return print_json(&json!({
                        "success": true,
                        "event_id": event_id,
                        "message": "Event booked"
                    }));
                }
                #[cfg(not(feature = "gcal"))]
                return Err(direct_unavailable());
            }
            let response = state
                .store
                .book_event(&BookEventRequest::from(&request))
                .await?;
            print_json(&response)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init_with_level(parse_level(&config.logging.level));

    let result = match AppState::new(config) {
        Ok(mut state) => {
            debug!(
                base_url = %state.api_client().base_url(),
                use_gcal = state.config.use_gcal,
                "Backend client ready"
            );
            run(cli.command, &mut state).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
