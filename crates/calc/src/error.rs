use std::fmt;

use etcalc_grid::{AxisId, IndexerError, InterpError, OrderError, StoreError};
use etcalc_solvers::exposure_scan::{self, Goal};
use thiserror::Error;

/// One input that fell outside its grid axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundViolation {
    pub axis: AxisId,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.axis.unit();
        write!(
            f,
            "{} {} {unit} is outside [{}, {}] {unit}",
            self.axis, self.value, self.min, self.max
        )
    }
}

/// Errors returned by [`Calculator`](crate::Calculator) queries.
///
/// The first five variants are the calculator's "undefined" answers: the
/// query is well formed but has no value. The rest are genuine failures of
/// the grid data or the solver. See [`QueryError::is_undefined`].
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("input outside the grid domain: {}", join(.violations))]
    OutOfDomain { violations: Vec<BoundViolation> },

    #[error("goal {goal} is not reached within {ceiling} s")]
    Unreachable { goal: Goal, ceiling: f64 },

    #[error("no order is centered within {tolerance_nm} nm of {wavelength_nm} nm")]
    UnresolvedWavelength { wavelength_nm: f64, tolerance_nm: f64 },

    #[error("order {order} is not tabulated")]
    UnknownOrder { order: i32 },

    #[error("{what} must be finite, got {value}")]
    InvalidTarget { what: &'static str, value: f64 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error(transparent)]
    Interpolation(#[from] InterpError),

    #[error(transparent)]
    Solver(#[from] exposure_scan::Error),
}

impl QueryError {
    /// Returns `true` if the query has no value for these inputs, as opposed
    /// to failing on bad grid data.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(
            self,
            QueryError::OutOfDomain { .. }
                | QueryError::Unreachable { .. }
                | QueryError::UnresolvedWavelength { .. }
                | QueryError::UnknownOrder { .. }
                | QueryError::InvalidTarget { .. }
        )
    }
}

impl From<OrderError> for QueryError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::UnresolvedWavelength {
                wavelength_nm,
                tolerance_nm,
            } => QueryError::UnresolvedWavelength {
                wavelength_nm,
                tolerance_nm,
            },
            OrderError::UnknownOrder { number } => QueryError::UnknownOrder { order: number },
            other => QueryError::Store(StoreError::Order(other)),
        }
    }
}

fn join(violations: &[BoundViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_answers_are_distinguished_from_failures() {
        let unreachable = QueryError::Unreachable {
            goal: Goal::AtMost(0.001),
            ceiling: 3600.0,
        };
        let failure = QueryError::Store(StoreError::Order(OrderError::Empty));

        assert!(unreachable.is_undefined());
        assert!(QueryError::UnknownOrder { order: 7 }.is_undefined());
        assert!(!failure.is_undefined());
    }

    #[test]
    fn order_lookup_errors_become_query_answers() {
        let err = QueryError::from(OrderError::UnknownOrder { number: 42 });
        assert!(matches!(err, QueryError::UnknownOrder { order: 42 }));

        let err = QueryError::from(OrderError::Empty);
        assert!(matches!(err, QueryError::Store(_)));
    }

    #[test]
    fn out_of_domain_lists_every_axis() {
        let err = QueryError::OutOfDomain {
            violations: vec![
                BoundViolation {
                    axis: AxisId::Temperature,
                    value: 1.0,
                    min: 3000.0,
                    max: 7000.0,
                },
                BoundViolation {
                    axis: AxisId::Magnitude,
                    value: 20.0,
                    min: 4.0,
                    max: 14.0,
                },
            ],
        };

        let message = err.to_string();
        assert!(message.contains("temperature 1 K is outside [3000, 7000] K"));
        assert!(message.contains("magnitude 20 mag is outside [4, 14] mag"));
    }
}
