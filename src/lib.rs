//! # DeckBox
//!
//! Generates the laser-cut panels of a sliding-lid box for stacks of trading
//! cards.
//!
//! ## Architecture
//!
//! 1. **deckbox-camtools** - Dimensions, edge profiles, panel plan, layout and
//!    SVG/G-code output
//! 2. **deckbox-settings** - JSON/TOML configuration files
//! 3. **deckbox** - Command-line binary tying both together

pub mod cli;

pub use deckbox_camtools::{
    BoxParameters, DeckBoxError, DeckBoxMaker, DeckBoxResult, FingerJointSettings,
    GcodeSettings, RenderedPanel,
};
pub use deckbox_settings::{Config, OutputFormat, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr, leaving stdout for the generated
/// document:
/// - RUST_LOG environment variable support
/// - `verbosity` raises the default level from INFO to DEBUG (1) or TRACE (2+)
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(verbosity > 0);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
