//! Utility modules for common functionality
//!
//! - `logging`: Logging configuration and setup
//! - `progress`: Spinner utilities for consistent UI feedback

pub mod logging;
pub mod progress;
