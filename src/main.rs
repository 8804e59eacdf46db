use std::io::Write;

use anyhow::Context;
use clap::Parser;
use deckbox::cli::Cli;
use deckbox::{init_logging, Config, DeckBoxMaker, OutputFormat};
use tracing::{debug, info};

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match Config::default_path() {
        Ok(path) if path.exists() => {
            debug!("Using config {}", path.display());
            Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        _ => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let mut config = load_config(&cli)?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    if let Some(path) = &cli.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        info!("Saved configuration to {}", path.display());
    }

    let mut maker = DeckBoxMaker::new(config.deck_box.clone())?;
    maker.generate().context("Failed to generate deck box")?;

    let document = match config.output.format {
        OutputFormat::Svg => maker.to_svg(),
        OutputFormat::Gcode => maker.to_gcode(&config.output.gcode),
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                "Wrote {} panels as {} to {}",
                maker.panels().len(),
                config.output.format,
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}
