//! `ck-domain`: shared types for the ChatKit session broker.
//!
//! Holds the TOML configuration model, the crate-spanning [`error::Error`]
//! type and the structured [`trace::TraceEvent`] log records.

pub mod config;
pub mod error;
pub mod trace;
