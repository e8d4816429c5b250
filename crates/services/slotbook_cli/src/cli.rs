// --- File: crates/services/slotbook_cli/src/cli.rs ---
use clap::{Parser, Subcommand};

/// Find free calendar slots and book them.
#[derive(Parser, Debug)]
#[command(name = "slotbook", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show whether Google Calendar is connected
    Status,

    /// Print the URL that starts the Google consent flow
    ConnectUrl,

    /// Finish the Google consent flow with the code from the redirect
    Callback { code: String },

    /// Disconnect Google Calendar
    Disconnect,

    /// List free slots for a day (YYYY-MM-DD or RFC 3339)
    Slots {
        date: String,

        /// Query Google Calendar directly instead of the backend
        #[arg(long)]
        direct: bool,
    },

    /// Book an event
    Book {
        /// Start time, RFC 3339
        #[arg(long)]
        start: String,

        /// End time, RFC 3339
        #[arg(long)]
        end: String,

        #[arg(long)]
        summary: String,

        #[arg(long)]
        description: Option<String>,

        /// Attendee email, repeatable
        #[arg(long = "attendee")]
        attendees: Vec<String>,

        /// Book in Google Calendar directly instead of through the backend
        #[arg(long)]
        direct: bool,
    },
}
