//! DeckBox Settings Crate
//!
//! Loads, validates and saves generator configuration files.

pub mod config;
pub mod error;

pub use config::{Config, OutputFormat, OutputSettings};
pub use error::{SettingsError, SettingsResult};
