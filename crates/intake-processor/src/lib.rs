//! Core library for the process intake service.
//!
//! The `intake` module carries the domain model, the two validation rule sets,
//! the process-type cache, and the notification pipeline. Persistence and
//! delivery are reached only through the traits in `intake::store`, so hosts
//! can wire in whatever backends they operate.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
