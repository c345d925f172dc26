use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Layer weight count {found} must match the number of energy layers in the plan ({expected})"
    )]
    CountMismatch { expected: usize, found: usize },

    #[error("Division by zero: {quantity} is zero")]
    Division { quantity: &'static str },

    #[error("Invalid scale factor {0}: it must be a positive, finite number")]
    InvalidScaleFactor(f64),

    #[error("Invalid plan structure: {0}")]
    InvalidStructure(String),
}
