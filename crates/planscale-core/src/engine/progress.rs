/// What happened to one control point during the rescale pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointReport {
    pub index: usize,
    pub layer: usize,
    /// Scale factor times the layer's weight.
    pub multiplier: f64,
    pub original_weights: Vec<f64>,
    pub rescaled_weights: Vec<f64>,
    pub discarded: usize,
}

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    ControlPointRescaled(ControlPointReport),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Builds the event only when someone is listening.
    #[inline]
    pub fn report_with(&self, event: impl FnOnce() -> Progress) {
        if let Some(cb) = &self.callback {
            cb(event());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseFinish);
        reporter.report_with(|| panic!("event must not be built without a listener"));
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event: Progress| {
            sink.lock().unwrap().push(format!("{:?}", event));
        }));

        reporter.report(Progress::TaskStart { total_steps: 3 });
        reporter.report_with(|| Progress::PhaseStart {
            name: "Rescaling Spot Weights",
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].contains("TaskStart"));
        assert!(seen[1].contains("Rescaling Spot Weights"));
    }
}
