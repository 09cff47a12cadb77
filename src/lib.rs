//! Guideart - Primary image resolution for live TV guide entries
//!
//! This library crate exposes the core functionality for integration testing.

pub mod cancel;
pub mod config;
pub mod fs;
pub mod images;
pub mod live_tv;
pub mod metadata;
pub mod net;
