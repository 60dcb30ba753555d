use std::sync::Arc;

use etcalc_core::{Model, Snapshot};
use etcalc_grid::{
    AxisId, AxisIndexer, GridId, GridStore, OrderError, OrderLocation, PerformanceGrid,
    StoreError,
};
use etcalc_solvers::exposure_scan::{self, Goal};
use tracing::{debug, warn};
use uom::si::{
    f64::{Length, ThermodynamicTemperature, Time, Velocity},
    length::nanometer,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
};

use crate::{
    BoundsValidator, Config, MaxExposure, QueryError,
    advisor::binding_order,
    curve::{PerformanceCurve, trace_scan},
};

/// A stellar target: effective temperature and V-band magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub temperature: ThermodynamicTemperature,
    pub magnitude: f64,
}

impl Target {
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, magnitude: f64) -> Self {
        Self {
            temperature,
            magnitude,
        }
    }

    /// Temperature in kelvin and magnitude, both checked finite.
    fn raw(&self) -> Result<(f64, f64), QueryError> {
        let temperature = finite("temperature", self.temperature.get::<kelvin>())?;
        let magnitude = finite("magnitude", self.magnitude)?;
        Ok((temperature, magnitude))
    }
}

/// RV precision, SNR, and exposure-time queries over a [`GridStore`].
///
/// Queries are independent. A query that has no value for its inputs returns
/// an error for which [`QueryError::is_undefined`] is `true`.
#[derive(Debug)]
pub struct Calculator<S> {
    store: S,
    config: Config,
}

/// The grid axes and their indexers, loaded for one query.
struct Domain {
    bounds: BoundsValidator,
    exptime: AxisIndexer,
    magnitude: AxisIndexer,
    temperature: AxisIndexer,
}

impl Domain {
    fn max_exptime(&self) -> f64 {
        self.exptime.axis().max()
    }

    fn curve<'a>(
        &'a self,
        grid: &'a PerformanceGrid,
        temperature: f64,
        magnitude: f64,
    ) -> PerformanceCurve<'a> {
        PerformanceCurve::new(
            grid,
            &self.exptime,
            self.magnitude.index(magnitude),
            self.temperature.index(temperature),
        )
    }
}

impl<S: GridStore> Calculator<S> {
    /// Creates a calculator with the default [`Config`].
    pub fn new(store: S) -> Self {
        Self::with_config(store, Config::default())
    }

    pub fn with_config(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the RV precision for a target at an exposure time.
    ///
    /// With `order` set, the precision of that single echelle order is
    /// returned; otherwise the whole-detector precision.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if any input is outside the grid, the order
    /// is not tabulated, or the grid data cannot be read.
    pub fn rv_precision(
        &self,
        target: Target,
        exptime: Time,
        order: Option<i32>,
    ) -> Result<Velocity, QueryError> {
        let (temperature, magnitude) = target.raw()?;
        let exptime = finite("exposure time", exptime.get::<second>())?;
        debug!(temperature, magnitude, exptime, ?order, "RV precision query");

        let domain = self.domain()?;
        domain.bounds.check(temperature, magnitude, Some(exptime))?;

        let grid = self.store.grid(self.rv_grid(order)?)?;
        let precision = domain.curve(&grid, temperature, magnitude).call(&exptime)?;

        debug!(precision, "RV precision (m/s)");
        Ok(Velocity::new::<meter_per_second>(precision))
    }

    /// Returns the shortest exposure time reaching an RV precision.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unreachable`] if the precision is not reached
    /// within the longest tabulated exposure time, or another [`QueryError`]
    /// as for [`Calculator::rv_precision`]. Exposure time is not bounds
    /// checked.
    pub fn exptime_for_rv_precision(
        &self,
        target: Target,
        precision: Velocity,
        order: Option<i32>,
    ) -> Result<Time, QueryError> {
        let (temperature, magnitude) = target.raw()?;
        let precision = finite("RV precision", precision.get::<meter_per_second>())?;
        debug!(
            temperature,
            magnitude,
            precision,
            ?order,
            "exposure time for RV precision query"
        );

        let domain = self.domain()?;
        domain.bounds.check(temperature, magnitude, None)?;

        let grid = self.store.grid(self.rv_grid(order)?)?;
        let curve = domain.curve(&grid, temperature, magnitude);
        self.solve(&curve, Goal::AtMost(precision), domain.max_exptime())
    }

    /// Returns the SNR of the order nearest `wavelength`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnresolvedWavelength`] if no order center lies
    /// within the configured tolerance, or another [`QueryError`] as for
    /// [`Calculator::rv_precision`].
    pub fn snr(
        &self,
        target: Target,
        exptime: Time,
        wavelength: Length,
    ) -> Result<f64, QueryError> {
        let (temperature, magnitude) = target.raw()?;
        let exptime = finite("exposure time", exptime.get::<second>())?;
        debug!(temperature, magnitude, exptime, "SNR query");

        let domain = self.domain()?;
        domain.bounds.check(temperature, magnitude, Some(exptime))?;

        let grid = self.store.grid(GridId::OrderSnr(self.locate(wavelength)?))?;
        let snr = domain.curve(&grid, temperature, magnitude).call(&exptime)?;

        debug!(snr, "SNR");
        Ok(snr)
    }

    /// Returns the shortest exposure time reaching an SNR at `wavelength`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Unreachable`] if the SNR is not reached within
    /// the longest tabulated exposure time, or another [`QueryError`] as for
    /// [`Calculator::snr`]. Exposure time is not bounds checked.
    pub fn exptime_for_snr(
        &self,
        target: Target,
        snr: f64,
        wavelength: Length,
    ) -> Result<Time, QueryError> {
        let (temperature, magnitude) = target.raw()?;
        let snr = finite("SNR", snr)?;
        debug!(temperature, magnitude, snr, "exposure time for SNR query");

        let domain = self.domain()?;
        domain.bounds.check(temperature, magnitude, None)?;

        let grid = self.store.grid(GridId::OrderSnr(self.locate(wavelength)?))?;
        let curve = domain.curve(&grid, temperature, magnitude);
        self.solve(&curve, Goal::AtLeast(snr), domain.max_exptime())
    }

    /// Returns the longest exposure time before any order saturates.
    ///
    /// Every order's SNR is evaluated at the configured reference exposure time.
    /// The order closest to its soft limit binds, and the exposure time at
    /// which it reaches the limit is returned. If it never does within the
    /// grid, the result is [`MaxExposure::Capped`] at the fallback ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfDomain`] if the target or the reference
    /// exposure time is outside the grid, or a [`QueryError`] if the grid
    /// data cannot be read.
    pub fn max_exptime(&self, target: Target) -> Result<MaxExposure, QueryError> {
        let (temperature, magnitude) = target.raw()?;
        let reference = self.config.reference_exptime();
        debug!(temperature, magnitude, reference, "max exposure time query");

        let domain = self.domain()?;
        domain.bounds.check(temperature, magnitude, Some(reference))?;

        let table = self.store.order_table()?;
        let mut samples = Vec::with_capacity(table.len());
        for (location, order) in table.iter() {
            let grid = self.store.grid(GridId::OrderSnr(location))?;
            let snr = domain.curve(&grid, temperature, magnitude).call(&reference)?;
            samples.push((location, *order, Snapshot::new(reference, snr)));
        }

        let binding = binding_order(samples)
            .ok_or(QueryError::Store(StoreError::Order(OrderError::Empty)))?;
        debug!(
            order = binding.order.number,
            ratio = binding.saturation_ratio(),
            "binding order"
        );

        let grid = self.store.grid(GridId::OrderSnr(binding.location))?;
        let curve = domain.curve(&grid, temperature, magnitude);
        let goal = Goal::AtLeast(binding.order.soft_limit);
        match self.solve(&curve, goal, domain.max_exptime()) {
            Ok(exptime) => Ok(MaxExposure::Solved { exptime, binding }),
            Err(QueryError::Unreachable { .. }) => Ok(MaxExposure::Capped {
                exptime: Time::new::<second>(self.config.fallback_ceiling()),
                binding,
            }),
            Err(err) => Err(err),
        }
    }

    fn domain(&self) -> Result<Domain, QueryError> {
        let exptime = self.store.axis(AxisId::ExposureTime)?;
        let magnitude = self.store.axis(AxisId::Magnitude)?;
        let temperature = self.store.axis(AxisId::Temperature)?;

        Ok(Domain {
            bounds: BoundsValidator::new(
                Arc::clone(&exptime),
                Arc::clone(&magnitude),
                Arc::clone(&temperature),
            ),
            exptime: AxisIndexer::log10(exptime)?,
            magnitude: AxisIndexer::linear(magnitude)?,
            temperature: AxisIndexer::linear(temperature)?,
        })
    }

    fn rv_grid(&self, order: Option<i32>) -> Result<GridId, QueryError> {
        match order {
            None => Ok(GridId::RvPrecision),
            Some(number) => {
                let location = self.store.order_table()?.locate_number(number)?;
                Ok(GridId::OrderRvPrecision(location))
            }
        }
    }

    fn locate(&self, wavelength: Length) -> Result<OrderLocation, QueryError> {
        let wavelength_nm = finite("wavelength", wavelength.get::<nanometer>())?;
        let table = self.store.order_table()?;
        let tolerance = self.config.wavelength_tolerance_nm();

        table.locate_wavelength(wavelength_nm, tolerance).map_err(|err| {
            warn!(
                wavelength_nm,
                tolerance_nm = tolerance,
                "wavelength not within any order"
            );
            QueryError::from(err)
        })
    }

    fn solve(
        &self,
        curve: &PerformanceCurve<'_>,
        goal: Goal,
        ceiling: f64,
    ) -> Result<Time, QueryError> {
        let solution = exposure_scan::scan(
            curve,
            goal,
            ceiling,
            self.config.scan(),
            trace_scan::<PerformanceCurve<'_>>,
        )?;
        debug!(
            status = ?solution.status,
            exptime = solution.exptime,
            steps = solution.steps,
            "scan finished"
        );

        solution
            .reached()
            .map(Time::new::<second>)
            .ok_or(QueryError::Unreachable { goal, ceiling })
    }
}

fn finite(what: &'static str, value: f64) -> Result<f64, QueryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QueryError::InvalidTarget { what, value })
    }
}
