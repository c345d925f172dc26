use crate::core::models::plan::{CONTROL_POINTS_PER_LAYER, IonBeam, IonPlan};
use crate::engine::config::RescaleConfig;
use crate::engine::error::EngineError;
use crate::engine::layers::LayerWeights;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::rescaler::{RescaleOutcome, SpotRescaler};
use crate::engine::scale::resolve_scale_factor;
use crate::engine::summary::{PlanSummary, recompute_summary};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct RescaleResult {
    /// The rescaled working copy; the input plan is left untouched.
    pub plan: IonPlan,
    pub outcome: RescaleOutcome,
    pub summary: PlanSummary,
}

#[instrument(skip_all, name = "rescale_workflow")]
pub fn run(
    original: &IonPlan,
    config: &RescaleConfig,
    reporter: &ProgressReporter,
) -> Result<RescaleResult, EngineError> {
    // === Phase 0: Validation, nothing is modified before this succeeds ===
    reporter.report(Progress::PhaseStart {
        name: "Validating Plan",
    });

    let scale_factor = resolve_scale_factor(config.dose_target, original.referenced_beam.beam_dose)?;
    info!(scale_factor, "Resolved scale factor.");

    validate_structure(&original.beam)?;

    let layer_weights = LayerWeights::resolve(
        config.layer_weights.as_deref(),
        original.beam.number_of_energy_layers(),
    )?;

    let meterset_per_weight = original
        .meterset_per_weight()
        .ok_or(EngineError::Division {
            quantity: "original final cumulative meterset weight",
        })?;
    debug!(meterset_per_weight, "MU per unit meterset weight.");

    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Rescale spot weights on a working copy ===
    reporter.report(Progress::PhaseStart {
        name: "Rescaling Spot Weights",
    });

    let mut working = original.clone();
    apply_identity(&mut working, config);

    let outcome = SpotRescaler::new(scale_factor, meterset_per_weight, &layer_weights)
        .run(&mut working.beam.control_points, reporter);

    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Recompute derived beam fields ===
    let summary = recompute_summary(
        original,
        &mut working,
        &outcome,
        config.dose_target,
        scale_factor,
    );

    if !summary.meterset_is_consistent() {
        if outcome.discard_count == 0 && !layer_weights.is_override() {
            warn!(
                beam_meterset = summary.beam_meterset,
                derived_meterset = summary.derived_meterset,
                "Beam meterset disagrees with the rescaled cumulative weight."
            );
        } else {
            debug!(
                beam_meterset = summary.beam_meterset,
                derived_meterset = summary.derived_meterset,
                "Beam meterset differs from the rescaled cumulative weight due to discards or layer weights."
            );
        }
    }

    info!(
        discarded = outcome.discard_count,
        final_cumulative_weight = summary.final_cumulative_weight,
        "Rescale complete."
    );

    Ok(RescaleResult {
        plan: working,
        outcome,
        summary,
    })
}

fn validate_structure(beam: &IonBeam) -> Result<(), EngineError> {
    if beam.number_of_control_points != beam.control_points.len() {
        return Err(EngineError::InvalidStructure(format!(
            "NumberOfControlPoints is {} but the sequence holds {} control points",
            beam.number_of_control_points,
            beam.control_points.len()
        )));
    }
    if beam.number_of_control_points % CONTROL_POINTS_PER_LAYER != 0 {
        return Err(EngineError::InvalidStructure(format!(
            "{} control points cannot be paired into energy layers",
            beam.number_of_control_points
        )));
    }
    Ok(())
}

fn apply_identity(plan: &mut IonPlan, config: &RescaleConfig) {
    if let Some(label) = &config.label {
        plan.label = label.clone();
    }
    if let Some(timestamp) = config.timestamp {
        plan.date = timestamp.format("%Y%m%d").to_string();
        plan.time = timestamp.format("%H%M%S").to_string();
    }
}
