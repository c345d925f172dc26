use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use chrono::NaiveDateTime;
use planscale::core::io::layer_weights::read_layer_weights;
use planscale::engine::config as core_config;
use std::path::Path;
use tracing::{debug, info};

/// Merges defaults, the optional TOML file and the command line, in rising
/// priority. `now` is stamped into the plan unless date stamping is disabled.
pub fn build_config(args: &Cli, now: NaiveDateTime) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    ensure_exists(&args.input)?;

    let output_path = args
        .output
        .clone()
        .or(file_config.output)
        .unwrap_or(defaults.output);

    let label = args.label.clone().or(file_config.label);

    let print_samples = args.print.or(file_config.print).filter(|&n| n > 0);

    let stamp_datetime = !args.keep_datetime
        && file_config
            .stamp_datetime
            .unwrap_or(defaults.stamp_datetime);

    let mut builder = core_config::RescaleConfigBuilder::new();

    if let Some(factor) = args.target.scale_factor {
        builder = builder.scale_factor(factor);
    }
    if let Some(dose) = args.target.dose {
        builder = builder.dose(dose);
    }
    if let Some(weights_path) = args.weights.as_ref().or(file_config.weights.as_ref()) {
        ensure_exists(weights_path)?;
        let weights = read_layer_weights(weights_path)?;
        info!(
            "Loaded {} energy layer weights from {:?}",
            weights.len(),
            weights_path
        );
        builder = builder.layer_weights(weights);
    }
    if let Some(label) = label {
        builder = builder.label(label);
    }
    if stamp_datetime {
        debug!("Stamping plan with {}", now);
        builder = builder.timestamp(now);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path,
        print_samples,
        core_config,
    })
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Provided path does not exist: {}", path.display()),
        )));
    }
    Ok(())
}
