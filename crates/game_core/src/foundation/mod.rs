//! Foundation module - Core utilities and types
//!
//! - Frame timing and pacing
//! - Logging setup

pub mod logging;
pub mod time;
