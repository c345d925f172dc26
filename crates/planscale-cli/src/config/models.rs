use planscale::engine::config as core_config;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Spots to sample per control point for the comparison report.
    pub print_samples: Option<usize>,
    pub core_config: core_config::RescaleConfig,
}
