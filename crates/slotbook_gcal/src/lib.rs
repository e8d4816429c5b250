// --- File: crates/slotbook_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod client;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod service;

pub use client::GcalClient;
pub use logic::{
    compute_free_slots, merge_busy_intervals, parse_date, AvailabilityError, FreeSlot, GcalError,
    WorkingWindow,
};
