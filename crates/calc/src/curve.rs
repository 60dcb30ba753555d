use etcalc_core::Model;
use etcalc_grid::{AxisIndexer, GridPoint, InterpError, PerformanceGrid};
use etcalc_solvers::exposure_scan::{Action, Event};
use tracing::{debug, trace};

/// A performance grid sliced at one stellar target.
///
/// Maps exposure time in seconds to the interpolated grid value, with the
/// magnitude and temperature fractional indices held fixed.
pub(crate) struct PerformanceCurve<'a> {
    grid: &'a PerformanceGrid,
    exptime: &'a AxisIndexer,
    magnitude: f64,
    temperature: f64,
}

impl<'a> PerformanceCurve<'a> {
    pub(crate) fn new(
        grid: &'a PerformanceGrid,
        exptime: &'a AxisIndexer,
        magnitude: f64,
        temperature: f64,
    ) -> Self {
        Self {
            grid,
            exptime,
            magnitude,
            temperature,
        }
    }
}

impl Model for PerformanceCurve<'_> {
    type Input = f64;
    type Output = f64;
    type Error = InterpError;

    fn call(&self, exptime: &f64) -> Result<f64, Self::Error> {
        let point = GridPoint::new(self.exptime.index(*exptime), self.magnitude, self.temperature);
        self.grid.value_at(point)
    }
}

/// Scan observer that traces every candidate.
pub(crate) fn trace_scan<M: Model>(event: &Event<'_, M>) -> Option<Action> {
    match event {
        Event::Evaluated {
            step,
            exptime,
            value,
            goal,
        } => trace!(step, exptime, value, %goal, "scan candidate"),
        Event::ModelFailed {
            step,
            exptime,
            error,
        } => debug!(step, exptime, %error, "scan candidate failed"),
    }
    None
}
