//! Command-line arguments and how they apply to a [`Config`].

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use deckbox_settings::{Config, OutputFormat};

/// Output format accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Svg,
    Gcode,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Svg => OutputFormat::Svg,
            FormatArg::Gcode => OutputFormat::Gcode,
        }
    }
}

/// Generate the panels of a laser-cut sliding-lid deck box
#[derive(Debug, Parser)]
#[command(name = "deckbox")]
#[command(author, version, about)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
pub struct Cli {
    /// Configuration file (.toml or .json); defaults to the platform config
    /// directory when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Thickness of one card stack (compartment width) in mm
    #[arg(long)]
    pub deckheight: Option<f64>,

    /// Card width in mm
    #[arg(long)]
    pub cardwidth: Option<f64>,

    /// Card height in mm
    #[arg(long)]
    pub cardheight: Option<f64>,

    /// Number of compartments
    #[arg(short, long)]
    pub num: Option<u32>,

    /// Material thickness in mm
    #[arg(short, long)]
    pub thickness: Option<f64>,

    /// Kerf compensation in mm
    #[arg(long)]
    pub burn: Option<f64>,

    /// Output format; inferred from the output file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save the effective configuration to this file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "svg" => Some(OutputFormat::Svg),
        "gcode" | "nc" | "ngc" => Some(OutputFormat::Gcode),
        _ => None,
    }
}

impl Cli {
    /// Apply every command-line override to `config`.
    pub fn apply(&self, config: &mut Config) {
        let params = &mut config.deck_box;
        if let Some(deckheight) = self.deckheight {
            params.deckheight = deckheight;
        }
        if let Some(cardwidth) = self.cardwidth {
            params.cardwidth = cardwidth;
        }
        if let Some(cardheight) = self.cardheight {
            params.cardheight = cardheight;
        }
        if let Some(num) = self.num {
            params.num = num;
        }
        if let Some(thickness) = self.thickness {
            params.thickness = thickness;
        }
        if let Some(burn) = self.burn {
            params.burn = burn;
        }

        if let Some(format) = self.format {
            config.output.format = format.into();
        } else if let Some(format) = self.output.as_deref().and_then(format_from_extension) {
            config.output.format = format;
        }
    }
}
