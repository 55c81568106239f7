//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the sprite transform composition
//! - Time management for the host frame loop
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod time;
