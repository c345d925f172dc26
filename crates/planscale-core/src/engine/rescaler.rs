use super::layers::LayerWeights;
use super::progress::{ControlPointReport, Progress, ProgressReporter};
use crate::core::models::plan::{ControlPoint, layer_of};
use tracing::{debug, trace};

/// Spots that would deliver fewer monitor units than this are undeliverable.
pub const MIN_SPOT_MU: f64 = 1.0;

/// Rounds a weight to the 32-bit float the plan record stores it as, so that
/// the cumulative weights written next to the spots match their stored sum.
#[inline]
pub fn to_stored_precision(weight: f64) -> f64 {
    weight as f32 as f64
}

/// Totals gathered by one pass over a beam's control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleOutcome {
    /// Sum of all spot weights before rescaling.
    pub original_cumulative_weight: f64,
    /// Sum of all spot weights after rescaling.
    pub new_cumulative_weight: f64,
    /// Spots zeroed because they fell below [`MIN_SPOT_MU`].
    pub discard_count: usize,
    /// MU delivered per unit of meterset weight, used for the floor test.
    pub meterset_per_weight: f64,
}

/// Rescales the spot weights of a control point sequence in delivery order.
///
/// Every spot weight is multiplied by the scale factor and its energy layer's
/// weight. A non-zero result worth fewer than [`MIN_SPOT_MU`] monitor units is
/// set to zero instead. Cumulative meterset weights are rewritten so that each
/// control point records the rescaled weight delivered before it.
///
/// Non-finite spot weights are not rejected; they propagate into the totals.
pub struct SpotRescaler<'a> {
    scale_factor: f64,
    meterset_per_weight: f64,
    layer_weights: &'a LayerWeights,
}

impl<'a> SpotRescaler<'a> {
    pub fn new(scale_factor: f64, meterset_per_weight: f64, layer_weights: &'a LayerWeights) -> Self {
        Self {
            scale_factor,
            meterset_per_weight,
            layer_weights,
        }
    }

    /// The combined multiplier for the spots of one control point.
    pub fn multiplier_for(&self, control_point_index: usize) -> f64 {
        self.scale_factor * self.layer_weights.for_control_point(control_point_index)
    }

    /// Applies `multiplier` to a single spot weight.
    ///
    /// Returns `None` when the spot falls below the deliverable floor. Kept
    /// spots are rounded to stored precision.
    #[inline]
    pub fn rescale_spot(&self, weight: f64, multiplier: f64) -> Option<f64> {
        let candidate = weight * multiplier;
        if candidate > 0.0 && candidate * self.meterset_per_weight < MIN_SPOT_MU {
            None
        } else {
            Some(to_stored_precision(candidate))
        }
    }

    /// Rescales every control point in place and returns the pass totals.
    pub fn run(
        &self,
        control_points: &mut [ControlPoint],
        reporter: &ProgressReporter,
    ) -> RescaleOutcome {
        let mut original_cumulative_weight = 0.0;
        let mut new_cumulative_weight = 0.0;
        let mut discard_count = 0;
        let mut odd_weights_logged = false;

        reporter.report(Progress::TaskStart {
            total_steps: control_points.len() as u64,
        });

        for (index, control_point) in control_points.iter_mut().enumerate() {
            let layer = layer_of(index);
            control_point.cumulative_meterset_weight = new_cumulative_weight;

            let multiplier = self.multiplier_for(index);
            let original_weights = std::mem::take(&mut control_point.scan_spot_meterset_weights);

            if index % 2 == 1 && !odd_weights_logged && original_weights.iter().any(|&w| w != 0.0) {
                debug!(
                    control_point = index,
                    "Control point closing energy layer {} carries non-zero spot weights.", layer
                );
                odd_weights_logged = true;
            }

            let mut discarded = 0;
            let rescaled_weights: Vec<f64> = original_weights
                .iter()
                .map(|&weight| {
                    self.rescale_spot(weight, multiplier).unwrap_or_else(|| {
                        trace!(
                            "Discarding spot with weight {:.4} ({:.4} MU) in control point {}",
                            weight * multiplier,
                            weight * multiplier * self.meterset_per_weight,
                            index
                        );
                        discarded += 1;
                        0.0
                    })
                })
                .collect();

            original_cumulative_weight += original_weights.iter().sum::<f64>();
            new_cumulative_weight += rescaled_weights.iter().sum::<f64>();
            discard_count += discarded;

            debug!(
                control_point = index,
                layer,
                multiplier,
                discarded,
                "Cumulative weight before: {:.4}, after: {:.4}",
                original_cumulative_weight,
                new_cumulative_weight
            );

            reporter.report_with(|| {
                Progress::ControlPointRescaled(ControlPointReport {
                    index,
                    layer,
                    multiplier,
                    original_weights: original_weights.clone(),
                    rescaled_weights: rescaled_weights.clone(),
                    discarded,
                })
            });
            reporter.report(Progress::TaskIncrement);

            control_point.scan_spot_meterset_weights = rescaled_weights;
        }

        reporter.report(Progress::TaskFinish);

        RescaleOutcome {
            original_cumulative_weight,
            new_cumulative_weight,
            discard_count,
            meterset_per_weight: self.meterset_per_weight,
        }
    }
}
