use crate::cli::Cli;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chrono::Local;
use planscale::{
    core::io::{dicom::DicomPlanFile, traits::PlanFile},
    engine::{
        comparison::ComparisonReporter, progress::ProgressReporter, rescaler::MIN_SPOT_MU,
        summary::PlanSummary,
    },
    workflows,
};
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: Cli) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args, Local::now().naive_local())?;

    info!("Loading input plan from {:?}", &app_config.input_path);
    let (plan, metadata) =
        DicomPlanFile::read_from_path(&app_config.input_path).map_err(|e| {
            CliError::FileParsing {
                path: app_config.input_path.clone(),
                source: e.into(),
            }
        })?;

    let progress_handler =
        CliProgressHandler::new(app_config.print_samples.map(ComparisonReporter::new));
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core rescale workflow...");
    let result = workflows::rescale::run(&plan, &app_config.core_config, &reporter)?;

    info!("Writing rescaled plan to {:?}", &app_config.output_path);
    DicomPlanFile::write_to_path(&result.plan, &metadata, &app_config.output_path)?;

    print!("{}", render_summary(&result.summary, &app_config.output_path));

    if result.summary.discard_count > 0 {
        warn!(
            "{} spot(s) fell below {} MU and were set to zero.",
            result.summary.discard_count, MIN_SPOT_MU
        );
    }

    Ok(())
}

/// Before/after table of the beam-level fields.
fn render_summary(summary: &PlanSummary, output_path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{:<34} {:>14} {:>14}", "", "Original", "Rescaled");
    let _ = writeln!(
        out,
        "{:<34} {:>14.4} {:>14.4}",
        "Final Cumulative Meterset Weight",
        summary.original_cumulative_weight,
        summary.final_cumulative_weight
    );
    let _ = writeln!(
        out,
        "{:<34} {:>14.4} {:>14.4}",
        "Beam Meterset [MU]", summary.original_beam_meterset, summary.beam_meterset
    );
    let _ = writeln!(
        out,
        "{:<34} {:>14.4} {:>14.4}",
        "Beam Dose [Gy(RBE)]", summary.original_beam_dose, summary.beam_dose
    );
    let _ = writeln!(out, "{:<34} {:>29.6}", "Scale Factor", summary.scale_factor);
    let _ = writeln!(out, "\n✓ Rescaled plan written to: {}", output_path.display());
    out
}
