use super::config::DoseTarget;
use super::error::EngineError;

/// Resolves the single global scale factor applied to every spot weight.
///
/// A dose target is converted into the ratio `target / original_beam_dose`;
/// an explicit factor is used as given.
pub fn resolve_scale_factor(
    target: DoseTarget,
    original_beam_dose: f64,
) -> Result<f64, EngineError> {
    let factor = match target {
        DoseTarget::ScaleFactor(factor) => factor,
        DoseTarget::Dose(dose) => {
            if original_beam_dose == 0.0 {
                return Err(EngineError::Division {
                    quantity: "original beam dose",
                });
            }
            dose / original_beam_dose
        }
    };

    if !factor.is_finite() || factor <= 0.0 {
        return Err(EngineError::InvalidScaleFactor(factor));
    }
    Ok(factor)
}

/// The beam dose after rescaling.
///
/// An explicit dose target is returned verbatim so it is not subject to the
/// rounding of `original * (target / original)`.
pub fn rescaled_beam_dose(target: DoseTarget, original_beam_dose: f64, scale_factor: f64) -> f64 {
    match target {
        DoseTarget::Dose(dose) => dose,
        DoseTarget::ScaleFactor(_) => original_beam_dose * scale_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_factor_is_used_as_given() {
        let factor = resolve_scale_factor(DoseTarget::ScaleFactor(1.25), 2.0).unwrap();
        assert_eq!(factor, 1.25);
    }

    #[test]
    fn dose_target_yields_ratio_to_original_dose() {
        let factor = resolve_scale_factor(DoseTarget::Dose(3.0), 2.0).unwrap();
        assert!((factor - 1.5).abs() < 1e-12);
    }

    #[test]
    fn equal_target_and_original_dose_yield_identity() {
        let factor = resolve_scale_factor(DoseTarget::Dose(1.8), 1.8).unwrap();
        assert_eq!(factor, 1.0);
    }

    #[test]
    fn zero_original_dose_is_a_division_error() {
        let result = resolve_scale_factor(DoseTarget::Dose(2.0), 0.0);
        assert!(matches!(result, Err(EngineError::Division { .. })));
    }

    #[test]
    fn non_positive_factor_is_rejected() {
        assert!(matches!(
            resolve_scale_factor(DoseTarget::ScaleFactor(0.0), 2.0),
            Err(EngineError::InvalidScaleFactor(_))
        ));
        assert!(matches!(
            resolve_scale_factor(DoseTarget::Dose(-1.0), 2.0),
            Err(EngineError::InvalidScaleFactor(_))
        ));
    }

    #[test]
    fn rescaled_dose_prefers_explicit_target() {
        assert_eq!(rescaled_beam_dose(DoseTarget::Dose(0.7), 2.1, 0.7 / 2.1), 0.7);
        assert_eq!(rescaled_beam_dose(DoseTarget::ScaleFactor(2.0), 1.5, 2.0), 3.0);
    }
}
