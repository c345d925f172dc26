use super::error::EngineError;
use crate::core::models::plan::layer_of;

/// The per-energy-layer multiplier source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LayerWeights {
    /// Every layer keeps weight 1.0.
    #[default]
    Identity,
    /// One weight per energy layer, in delivery order.
    Override(Vec<f64>),
}

impl LayerWeights {
    /// Validates an optional override against the plan's energy layer count.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CountMismatch`] if the override does not have
    /// exactly one entry per energy layer.
    pub fn resolve(
        weights: Option<&[f64]>,
        number_of_energy_layers: usize,
    ) -> Result<Self, EngineError> {
        match weights {
            None => Ok(LayerWeights::Identity),
            Some(weights) if weights.len() != number_of_energy_layers => {
                Err(EngineError::CountMismatch {
                    expected: number_of_energy_layers,
                    found: weights.len(),
                })
            }
            Some(weights) => Ok(LayerWeights::Override(weights.to_vec())),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, LayerWeights::Override(_))
    }

    /// Weight of an energy layer; layers past the end of an override keep 1.0.
    pub fn for_layer(&self, layer: usize) -> f64 {
        match self {
            LayerWeights::Identity => 1.0,
            LayerWeights::Override(weights) => weights.get(layer).copied().unwrap_or(1.0),
        }
    }

    /// Weight of the energy layer the control point belongs to.
    pub fn for_control_point(&self, control_point_index: usize) -> f64 {
        self.for_layer(layer_of(control_point_index))
    }
}
