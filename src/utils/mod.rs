//! Utility modules for lookforge
//!
//! This module contains utility functions and types used throughout the library.

pub mod cancel;
pub mod mime;

pub use cancel::CancelHandle;
