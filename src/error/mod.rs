//! Error handling for the modscan application
//!
//! This module provides the error handling system for the modscan application,
//! including error types, result aliases, and error context utilities.

pub mod context;
pub mod types;

pub use context::{handle_error, try_with_recovery, OptionExt, ResultExt};
pub use types::{ErrorSeverity, ModscanError, Result, MAX_RENDERED_VIOLATIONS};
