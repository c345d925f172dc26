/// Number of control points that make up one energy layer.
pub const CONTROL_POINTS_PER_LAYER: usize = 2;

/// Returns the energy layer a control point belongs to.
///
/// Control points are paired by index parity: indices `2k` and `2k + 1` form
/// layer `k`.
#[inline]
pub fn layer_of(control_point_index: usize) -> usize {
    control_point_index / CONTROL_POINTS_PER_LAYER
}

/// A single node of a beam's ordered delivery sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPoint {
    /// Meterset weight delivered before this control point.
    pub cumulative_meterset_weight: f64,
    /// Relative weight of every scan spot at this control point.
    pub scan_spot_meterset_weights: Vec<f64>,
}

impl ControlPoint {
    pub fn new(cumulative_meterset_weight: f64, scan_spot_meterset_weights: Vec<f64>) -> Self {
        Self {
            cumulative_meterset_weight,
            scan_spot_meterset_weights,
        }
    }

    /// Sum of all spot weights at this control point.
    pub fn total_weight(&self) -> f64 {
        self.scan_spot_meterset_weights.iter().sum()
    }

    pub fn spot_count(&self) -> usize {
        self.scan_spot_meterset_weights.len()
    }
}

/// The dosimetric entry of the fraction group that references the beam.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferencedBeam {
    /// Beam dose in Gy(RBE).
    pub beam_dose: f64,
    /// Beam meterset in MU.
    pub beam_meterset: f64,
}

/// An ion beam with its control point sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IonBeam {
    pub final_cumulative_meterset_weight: f64,
    /// The declared number of control points, as stored in the record.
    pub number_of_control_points: usize,
    pub control_points: Vec<ControlPoint>,
}

impl IonBeam {
    /// Number of energy layers implied by the declared control point count.
    pub fn number_of_energy_layers(&self) -> usize {
        self.number_of_control_points / CONTROL_POINTS_PER_LAYER
    }

    /// Sum of spot weights over every control point.
    pub fn total_spot_weight(&self) -> f64 {
        self.control_points.iter().map(ControlPoint::total_weight).sum()
    }
}

/// The subset of an RT Ion Plan that spot-weight rescaling reads and writes.
///
/// A plan carries exactly one beam and one referenced beam; additional beams
/// or fraction groups stay in the underlying record untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IonPlan {
    pub label: String,
    /// RTPlanDate, formatted `YYYYMMDD`.
    pub date: String,
    /// RTPlanTime, formatted `HHMMSS`.
    pub time: String,
    pub referenced_beam: ReferencedBeam,
    pub beam: IonBeam,
}

impl IonPlan {
    pub fn new(label: impl Into<String>, referenced_beam: ReferencedBeam, beam: IonBeam) -> Self {
        Self {
            label: label.into(),
            referenced_beam,
            beam,
            ..Default::default()
        }
    }

    /// MU delivered per unit of meterset weight, or `None` if the final
    /// cumulative weight is zero.
    pub fn meterset_per_weight(&self) -> Option<f64> {
        let final_weight = self.beam.final_cumulative_meterset_weight;
        if final_weight == 0.0 {
            None
        } else {
            Some(self.referenced_beam.beam_meterset / final_weight)
        }
    }
}
