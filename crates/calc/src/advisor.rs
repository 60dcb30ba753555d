use etcalc_core::Snapshot;
use etcalc_grid::{OrderLocation, SpectralOrder};
use uom::si::f64::Time;

/// The order whose saturation limits the exposure time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BindingOrder {
    /// Position in the order table.
    pub location: OrderLocation,

    /// The order's number, center wavelength, and soft limit.
    pub order: SpectralOrder,

    /// SNR at the reference exposure time (input in s).
    pub sample: Snapshot<f64, f64>,
}

impl BindingOrder {
    /// Sampled SNR as a fraction of the soft limit.
    #[must_use]
    pub fn saturation_ratio(&self) -> f64 {
        self.sample.output / self.order.soft_limit
    }
}

/// The maximum recommended exposure time for a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxExposure {
    /// The binding order reaches its soft limit at `exptime`.
    Solved {
        exptime: Time,
        binding: BindingOrder,
    },

    /// The soft limit is not reached within the grid; `exptime` is the
    /// fallback ceiling.
    Capped {
        exptime: Time,
        binding: BindingOrder,
    },
}

impl MaxExposure {
    /// Returns the recommended exposure time.
    #[must_use]
    pub fn exptime(&self) -> Time {
        match self {
            MaxExposure::Solved { exptime, .. } | MaxExposure::Capped { exptime, .. } => *exptime,
        }
    }

    /// Returns the order that determined the result.
    #[must_use]
    pub fn binding(&self) -> &BindingOrder {
        match self {
            MaxExposure::Solved { binding, .. } | MaxExposure::Capped { binding, .. } => binding,
        }
    }

    /// Returns `true` if the fallback ceiling was used.
    #[must_use]
    pub fn is_capped(&self) -> bool {
        matches!(self, MaxExposure::Capped { .. })
    }
}

/// Picks the order with the largest saturation ratio, first one on ties.
///
/// Orders whose ratio is not a number are skipped.
pub(crate) fn binding_order(
    samples: impl IntoIterator<Item = (OrderLocation, SpectralOrder, Snapshot<f64, f64>)>,
) -> Option<BindingOrder> {
    samples
        .into_iter()
        .map(|(location, order, sample)| BindingOrder {
            location,
            order,
            sample,
        })
        .filter(|candidate| !candidate.saturation_ratio().is_nan())
        .fold(None, |best: Option<BindingOrder>, candidate| match best {
            Some(best) if candidate.saturation_ratio() <= best.saturation_ratio() => Some(best),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::time::second;

    use super::*;

    fn sample(index: usize, soft_limit: f64, snr: f64) -> (OrderLocation, SpectralOrder, Snapshot<f64, f64>) {
        (
            OrderLocation(index),
            SpectralOrder {
                number: 170 - i32::try_from(index).unwrap(),
                wavelength_nm: 400.0 + 10.0 * index as f64,
                soft_limit,
            },
            Snapshot::new(60.0, snr),
        )
    }

    #[test]
    fn picks_largest_ratio() {
        let binding = binding_order([
            sample(0, 500.0, 100.0),
            sample(1, 200.0, 100.0),
            sample(2, 1000.0, 300.0),
        ])
        .unwrap();

        assert_eq!(binding.location, OrderLocation(1));
        assert_relative_eq!(binding.saturation_ratio(), 0.5);
    }

    #[test]
    fn ties_keep_first_order() {
        let binding = binding_order([
            sample(0, 100.0, 50.0),
            sample(1, 200.0, 100.0),
        ])
        .unwrap();

        assert_eq!(binding.location, OrderLocation(0));
    }

    #[test]
    fn skips_nan_ratios() {
        let binding = binding_order([sample(0, 100.0, f64::NAN), sample(1, 100.0, 10.0)]).unwrap();
        assert_eq!(binding.location, OrderLocation(1));

        assert!(binding_order([sample(0, 100.0, f64::NAN)]).is_none());
    }

    #[test]
    fn accessors_cover_both_outcomes() {
        let binding = binding_order([sample(0, 100.0, 10.0)]).unwrap();
        let solved = MaxExposure::Solved {
            exptime: Time::new::<second>(620.0),
            binding,
        };
        let capped = MaxExposure::Capped {
            exptime: Time::new::<second>(3600.0),
            binding,
        };

        assert!(!solved.is_capped());
        assert!(capped.is_capped());
        assert_relative_eq!(capped.exptime().get::<second>(), 3600.0);
        assert_eq!(solved.binding().order.number, 170);
    }
}
