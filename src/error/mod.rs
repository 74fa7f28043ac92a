//! Error Handling Module
//!
//! This module provides error handling for the styling client, including:
//! - The core error type (`StyleError`, `ErrorCategory`)
//! - Fixed user-facing messages per error kind
//! - Type conversions from common error types

mod conversions;
pub mod types;

pub use types::*;
