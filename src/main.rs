mod config;
mod generate;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "mdicons", about = "Generate the Markdown downloader extension icons")]
struct Cli {
    /// Directory that receives icon16.png, icon48.png and icon128.png
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Config file to use instead of ~/.config/mdicons/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("mdicons=info".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    config.validate().context("Invalid icon configuration")?;

    let style = config.style()?;
    let fonts = config.font_chain();
    info!(
        "Rendering '{}' at {:?} into {}",
        style.label,
        config.sizes,
        cli.output_dir.display()
    );

    generate::generate_all(&config.sizes, &cli.output_dir, &style, &fonts)?;
    Ok(())
}
