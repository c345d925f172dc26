use super::config::DoseTarget;
use super::rescaler::RescaleOutcome;
use super::scale::rescaled_beam_dose;
use crate::core::models::plan::IonPlan;

/// Relative tolerance for the beam meterset cross-check.
pub const METERSET_TOLERANCE: f64 = 1e-6;

/// Derived beam fields before and after rescaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSummary {
    pub scale_factor: f64,
    /// Sum of the spot weights read from the plan.
    pub original_cumulative_weight: f64,
    pub final_cumulative_weight: f64,
    pub original_beam_meterset: f64,
    pub beam_meterset: f64,
    /// `final_cumulative_weight * meterset_per_weight`, kept for the cross-check.
    pub derived_meterset: f64,
    pub original_beam_dose: f64,
    pub beam_dose: f64,
    pub discard_count: usize,
}

impl PlanSummary {
    /// Relative deviation of the derived meterset from the written one.
    pub fn meterset_deviation(&self) -> f64 {
        if self.beam_meterset == 0.0 {
            return self.derived_meterset.abs();
        }
        ((self.derived_meterset - self.beam_meterset) / self.beam_meterset).abs()
    }

    pub fn meterset_is_consistent(&self) -> bool {
        self.meterset_deviation() <= METERSET_TOLERANCE
    }
}

/// Writes the beam-level fields that follow from a completed rescale pass.
///
/// `original` supplies the source-of-truth meterset and dose; `working` is the
/// rescaled copy that receives the new values.
pub fn recompute_summary(
    original: &IonPlan,
    working: &mut IonPlan,
    outcome: &RescaleOutcome,
    target: DoseTarget,
    scale_factor: f64,
) -> PlanSummary {
    let original_beam = original.referenced_beam;
    let beam_meterset = original_beam.beam_meterset * scale_factor;
    let beam_dose = rescaled_beam_dose(target, original_beam.beam_dose, scale_factor);

    working.beam.final_cumulative_meterset_weight = outcome.new_cumulative_weight;
    working.referenced_beam.beam_meterset = beam_meterset;
    working.referenced_beam.beam_dose = beam_dose;

    PlanSummary {
        scale_factor,
        original_cumulative_weight: outcome.original_cumulative_weight,
        final_cumulative_weight: outcome.new_cumulative_weight,
        original_beam_meterset: original_beam.beam_meterset,
        beam_meterset,
        derived_meterset: outcome.new_cumulative_weight * outcome.meterset_per_weight,
        original_beam_dose: original_beam.beam_dose,
        beam_dose,
        discard_count: outcome.discard_count,
    }
}
