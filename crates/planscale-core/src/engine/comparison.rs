use super::progress::ControlPointReport;
use super::utils::sampling::sample_distinct_indices;
use rand::Rng;
use std::fmt::Write;

/// Renders sampled before/after spot weights of a control point.
///
/// Sampling uses an unseeded generator and only reads the report, so the
/// rescaled plan is never affected by it.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReporter {
    sample_count: usize,
}

impl ComparisonReporter {
    pub fn new(sample_count: usize) -> Self {
        Self { sample_count }
    }

    /// Renders a comparison table using the thread-local random generator.
    pub fn render(&self, report: &ControlPointReport) -> String {
        self.render_with(report, &mut rand::thread_rng())
    }

    pub fn render_with(&self, report: &ControlPointReport, rng: &mut impl Rng) -> String {
        let rows = sample_pairs(
            &report.original_weights,
            &report.rescaled_weights,
            self.sample_count,
            rng,
        );

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\nLayer {} (control point {})  Scale Factor {}",
            report.layer, report.index, report.multiplier
        );
        out.push_str("Original | Modified\n");
        out.push_str("---------|---------\n");
        for (original, rescaled) in rows {
            let _ = writeln!(out, "{:8.4} | {:8.4}", original, rescaled);
        }
        out
    }
}

/// Picks up to `count` distinct positions and returns the paired values.
pub fn sample_pairs(
    original: &[f64],
    rescaled: &[f64],
    count: usize,
    rng: &mut impl Rng,
) -> Vec<(f64, f64)> {
    let len = original.len().min(rescaled.len());
    sample_distinct_indices(len, count, rng)
        .into_iter()
        .map(|i| (original[i], rescaled[i]))
        .collect()
}
