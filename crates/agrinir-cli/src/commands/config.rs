use std::path::PathBuf;

use agrinir_core::config::{EstimatorConfig, ProcessingConfig};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the three-method estimator preset (no multi-resolution)
    #[arg(long)]
    pub three_method: bool,
}

/// Print or save a full default ProcessingConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = ProcessingConfig {
        estimator: if args.three_method {
            EstimatorConfig::three_method()
        } else {
            EstimatorConfig::four_method()
        },
        ..ProcessingConfig::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
