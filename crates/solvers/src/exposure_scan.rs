//! Fixed-step scan for the shortest exposure time meeting a goal.
//!
//! # Algorithm
//!
//! Candidates are visited in increasing order, `step × (j + start_offset)`
//! seconds for `j = 0, 1, 2, …`. The first candidate whose model value meets
//! the [`Goal`] is returned. If the next candidate is greater than the
//! ceiling, the scan ends with [`Status::CeilingExceeded`]; a candidate equal
//! to the ceiling is still evaluated.
//!
//! The model is assumed monotone in exposure time (SNR rising, RV precision
//! falling), but nothing depends on it: the scan simply reports the first
//! candidate that satisfies the goal.
//!
//! # Observer Events
//!
//! The scan emits one [`Event`] per candidate evaluated:
//!
//! - [`Event::Evaluated`]: the model returned a finite value
//! - [`Event::ModelFailed`]: the model returned an error
//!
//! Observers can return [`Action::StopEarly`] to end the scan with
//! [`Status::StoppedByObserver`]. Stopping on a model failure ends the scan
//! without an error.

mod action;
mod config;
mod error;
mod event;
mod goal;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use goal::Goal;
pub use solution::{Solution, Status};

use etcalc_core::{Model, Observer};

/// Scans exposure times for the first candidate meeting `goal`.
///
/// `ceiling` is the largest exposure time, in seconds, that may be
/// evaluated. See the [module docs](self) for the candidate sequence and
/// observer actions.
///
/// # Errors
///
/// Returns an error if the goal target is not finite, the ceiling is not
/// finite and positive, the model returns a non-finite value, or the model
/// fails and the observer does not stop the scan.
pub fn scan<M, Obs>(
    model: &M,
    goal: Goal,
    ceiling: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    M: Model<Input = f64, Output = f64>,
    Obs: for<'a> Observer<Event<'a, M>, Action>,
{
    if !goal.target().is_finite() {
        return Err(Error::InvalidGoal {
            target: goal.target(),
        });
    }
    if !ceiling.is_finite() || ceiling <= 0.0 {
        return Err(Error::InvalidCeiling { ceiling });
    }

    let mut last: Option<(f64, f64)> = None;
    let mut step = 0;
    loop {
        let exptime = config.candidate(step);
        if exptime > ceiling {
            return Ok(Solution {
                status: Status::CeilingExceeded,
                exptime,
                value: last.map(|(_, value)| value),
                steps: step,
            });
        }

        let value = match model.call(&exptime) {
            Ok(value) => value,
            Err(error) => {
                let event = Event::ModelFailed {
                    step,
                    exptime,
                    error: &error,
                };
                if let Some(Action::StopEarly) = observer.observe(&event) {
                    return Ok(stopped(last, exptime, step));
                }
                return Err(Error::Model(Box::new(error)));
            }
        };

        if !value.is_finite() {
            return Err(Error::NonFiniteValue { exptime, value });
        }

        let event = Event::Evaluated {
            step,
            exptime,
            value,
            goal,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                exptime,
                value: Some(value),
                steps: step + 1,
            });
        }

        if goal.is_met(value) {
            return Ok(Solution {
                status: Status::Reached,
                exptime,
                value: Some(value),
                steps: step + 1,
            });
        }

        last = Some((exptime, value));
        step += 1;
    }
}

/// Scans exposure times without observer support.
///
/// This is a convenience wrapper around [`scan`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the model fails.
pub fn scan_unobserved<M>(
    model: &M,
    goal: Goal,
    ceiling: f64,
    config: &Config,
) -> Result<Solution, Error>
where
    M: Model<Input = f64, Output = f64>,
{
    scan(model, goal, ceiling, config, ())
}

/// Solution for a scan stopped on a failed candidate.
fn stopped(last: Option<(f64, f64)>, failed_exptime: f64, step: usize) -> Solution {
    let (exptime, value) = match last {
        Some((exptime, value)) => (exptime, Some(value)),
        None => (failed_exptime, None),
    };
    Solution {
        status: Status::StoppedByObserver,
        exptime,
        value,
        steps: step + 1,
    }
}
