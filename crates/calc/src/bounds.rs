use std::sync::Arc;

use etcalc_grid::{AxisId, GridAxis};
use tracing::warn;

use crate::{BoundViolation, QueryError};

/// Checks query inputs against the grid axes.
///
/// Every axis is checked, so a rejected query reports all offending inputs
/// at once. Bounds are closed.
#[derive(Debug, Clone)]
pub struct BoundsValidator {
    exptime: Arc<GridAxis>,
    magnitude: Arc<GridAxis>,
    temperature: Arc<GridAxis>,
}

impl BoundsValidator {
    #[must_use]
    pub fn new(exptime: Arc<GridAxis>, magnitude: Arc<GridAxis>, temperature: Arc<GridAxis>) -> Self {
        Self {
            exptime,
            magnitude,
            temperature,
        }
    }

    /// Validates temperature (K), magnitude, and optionally exposure time (s).
    ///
    /// Inverse queries pass `None` for the exposure time.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfDomain`] listing every violated axis.
    pub fn check(
        &self,
        temperature: f64,
        magnitude: f64,
        exptime: Option<f64>,
    ) -> Result<(), QueryError> {
        let checks = [
            Some((AxisId::Temperature, &self.temperature, temperature)),
            Some((AxisId::Magnitude, &self.magnitude, magnitude)),
            exptime.map(|value| (AxisId::ExposureTime, &self.exptime, value)),
        ];

        let violations: Vec<_> = checks
            .into_iter()
            .flatten()
            .filter(|(_, axis, value)| !axis.contains(*value))
            .map(|(id, axis, value)| BoundViolation {
                axis: id,
                value,
                min: axis.min(),
                max: axis.max(),
            })
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        for violation in &violations {
            warn!(
                axis = %violation.axis,
                value = violation.value,
                min = violation.min,
                max = violation.max,
                "input out of bounds"
            );
        }
        Err(QueryError::OutOfDomain { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> BoundsValidator {
        let axis = |values: &[f64]| Arc::new(GridAxis::new(values.to_vec()).unwrap());
        BoundsValidator::new(
            axis(&[10.0, 100.0, 3600.0]),
            axis(&[4.0, 8.0, 14.0]),
            axis(&[3000.0, 5000.0, 7000.0]),
        )
    }

    fn violated_axes(result: Result<(), QueryError>) -> Vec<AxisId> {
        match result {
            Err(QueryError::OutOfDomain { violations }) => {
                violations.iter().map(|v| v.axis).collect()
            }
            other => panic!("expected out-of-domain, got {other:?}"),
        }
    }

    #[test]
    fn accepts_closed_interval() {
        let validator = validator();

        assert!(validator.check(5500.0, 8.0, Some(300.0)).is_ok());
        assert!(validator.check(3000.0, 14.0, Some(10.0)).is_ok());
        assert!(validator.check(7000.0, 4.0, Some(3600.0)).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let violated = violated_axes(validator().check(1.0, 20.0, Some(5.0)));

        assert_eq!(
            violated,
            vec![AxisId::Temperature, AxisId::Magnitude, AxisId::ExposureTime]
        );
    }

    #[test]
    fn exposure_time_is_optional() {
        let validator = validator();

        assert!(validator.check(5500.0, 8.0, None).is_ok());
        assert_eq!(
            violated_axes(validator.check(5500.0, 8.0, Some(1e5))),
            vec![AxisId::ExposureTime]
        );
    }

    #[test]
    fn nan_is_out_of_bounds() {
        assert_eq!(
            violated_axes(validator().check(f64::NAN, 8.0, None)),
            vec![AxisId::Temperature]
        );
    }
}
