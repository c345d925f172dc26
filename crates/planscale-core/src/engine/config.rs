use crate::core::io::dicom::MAX_SHORT_STRING_LEN;
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Parameters '{0}' and '{1}' are mutually exclusive")]
    Conflicting(&'static str, &'static str),
    #[error("Plan label is {length} characters long; at most {max} are allowed")]
    LabelTooLong { length: usize, max: usize },
}

/// How the global scale factor is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoseTarget {
    /// Multiply every spot weight by this factor.
    ScaleFactor(f64),
    /// Rescale so the beam delivers this dose, in Gy(RBE).
    Dose(f64),
}

impl Default for DoseTarget {
    fn default() -> Self {
        DoseTarget::ScaleFactor(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RescaleConfig {
    pub dose_target: DoseTarget,
    /// Per-energy-layer multipliers; `None` applies 1.0 to every layer.
    pub layer_weights: Option<Vec<f64>>,
    /// New RTPlanLabel; the original label is kept when `None`.
    pub label: Option<String>,
    /// New RTPlanDate/RTPlanTime; the original values are kept when `None`.
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Default)]
pub struct RescaleConfigBuilder {
    scale_factor: Option<f64>,
    dose: Option<f64>,
    layer_weights: Option<Vec<f64>>,
    label: Option<String>,
    timestamp: Option<NaiveDateTime>,
}

impl RescaleConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale_factor(mut self, factor: f64) -> Self {
        self.scale_factor = Some(factor);
        self
    }
    pub fn dose(mut self, dose: f64) -> Self {
        self.dose = Some(dose);
        self
    }
    pub fn layer_weights(mut self, weights: Vec<f64>) -> Self {
        self.layer_weights = Some(weights);
        self
    }
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Result<RescaleConfig, ConfigError> {
        let dose_target = match (self.scale_factor, self.dose) {
            (Some(_), Some(_)) => return Err(ConfigError::Conflicting("scale_factor", "dose")),
            (_, Some(dose)) => DoseTarget::Dose(dose),
            (Some(factor), None) => DoseTarget::ScaleFactor(factor),
            (None, None) => DoseTarget::default(),
        };
        if let Some(label) = &self.label {
            let length = label.chars().count();
            if length > MAX_SHORT_STRING_LEN {
                return Err(ConfigError::LabelTooLong {
                    length,
                    max: MAX_SHORT_STRING_LEN,
                });
            }
        }
        Ok(RescaleConfig {
            dose_target,
            layer_weights: self.layer_weights,
            label: self.label,
            timestamp: self.timestamp,
        })
    }
}
