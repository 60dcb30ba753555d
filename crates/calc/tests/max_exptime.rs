mod common;

use approx::assert_relative_eq;
use etcalc::{Calculator, Config, MaxExposure, QueryError};
use etcalc_grid::{AxisId, OrderLocation};
use etcalc_solvers::exposure_scan;
use uom::si::time::second;

use common::{nm, store, target};

#[test]
fn binding_order_has_largest_saturation_ratio() {
    let calculator = Calculator::new(store());

    let max = calculator.max_exptime(target(5000.0, 8.0)).unwrap();
    let binding = max.binding();

    // Order 119 has twice the throughput and the lowest soft limit.
    assert_eq!(binding.location, OrderLocation(1));
    assert_eq!(binding.order.number, 119);
    assert_relative_eq!(binding.sample.input, 60.0);
    assert_relative_eq!(binding.order.soft_limit, 400.0);
    assert!(binding.saturation_ratio() > 0.0 && binding.saturation_ratio() < 1.0);
}

#[test]
fn solved_result_matches_inverse_snr_query() {
    let calculator = Calculator::new(store());
    let t = target(5000.0, 8.0);

    let max = calculator.max_exptime(t).unwrap();
    let MaxExposure::Solved { exptime, binding } = max else {
        panic!("expected a solved exposure time, got {max:?}");
    };

    let wavelength = nm(binding.order.wavelength_nm);
    let expected = calculator
        .exptime_for_snr(t, binding.order.soft_limit, wavelength)
        .unwrap();
    assert_eq!(exptime, expected);

    // 20 √t = 400 at t = 400 s, between the 300 s and 1000 s nodes.
    let seconds = exptime.get::<second>();
    assert!(seconds > 300.0 && seconds < 1000.0);
}

#[test]
fn faint_target_is_capped_at_fallback_ceiling() {
    let calculator = Calculator::new(store());

    let max = calculator.max_exptime(target(3000.0, 14.0)).unwrap();

    assert!(max.is_capped());
    assert_relative_eq!(max.exptime().get::<second>(), 3600.0);
    assert_eq!(max.binding().order.number, 119);
}

#[test]
fn fallback_ceiling_is_configurable() {
    let config = Config::new(0.1, 60.0, 1800.0, exposure_scan::Config::default()).unwrap();
    let calculator = Calculator::with_config(store(), config);

    let max = calculator.max_exptime(target(3000.0, 14.0)).unwrap();

    assert!(max.is_capped());
    assert_relative_eq!(max.exptime().get::<second>(), 1800.0);
}

#[test]
fn bright_target_saturates_quickly() {
    let calculator = Calculator::new(store());

    let bright = calculator.max_exptime(target(7000.0, 4.0)).unwrap();
    let reference = calculator.max_exptime(target(5000.0, 8.0)).unwrap();

    assert!(!bright.is_capped());
    assert!(bright.exptime() < reference.exptime());
}

#[test]
fn out_of_range_target_is_undefined() {
    let calculator = Calculator::new(store());

    let err = calculator.max_exptime(target(1.0, 8.0)).unwrap_err();

    assert!(err.is_undefined());
    assert!(matches!(err, QueryError::OutOfDomain { .. }));
}

#[test]
fn reference_exposure_outside_exposure_time_axis_is_undefined() {
    let config = Config::new(0.1, 5.0, 3600.0, exposure_scan::Config::default()).unwrap();
    let calculator = Calculator::with_config(store(), config);

    let err = calculator.max_exptime(target(5000.0, 8.0)).unwrap_err();

    let QueryError::OutOfDomain { violations } = err else {
        panic!("expected out-of-domain, got {err:?}");
    };
    assert_eq!(violations[0].axis, AxisId::ExposureTime);
}
