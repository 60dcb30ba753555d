//! Synthetic analytic grids shared by the integration tests.
//!
//! SNR of order `k` is `10 × s_k × √t × 10^(-0.2 (V − 8)) × T / 5000` and
//! RV precision is `1000 / SNR` m/s, with `s_k = 1` for the whole detector.
//! At exact grid nodes the calculator must reproduce these values.

#![allow(dead_code)]

use etcalc::Target;
use etcalc_grid::{
    GridAxis, MemoryGridStore, OrderGrids, OrderTable, PerformanceGrid,
};
use ndarray::Array3;
use uom::si::{
    f64::{Length, ThermodynamicTemperature, Time, Velocity},
    length::nanometer,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
};

pub const EXPTIME: [f64; 6] = [10.0, 30.0, 100.0, 300.0, 1000.0, 3600.0];
pub const MAGNITUDE: [f64; 6] = [4.0, 6.0, 8.0, 10.0, 12.0, 14.0];
pub const TEMPERATURE: [f64; 5] = [3000.0, 4000.0, 5000.0, 6000.0, 7000.0];

pub const ORDER_NUMBERS: [i32; 3] = [120, 119, 118];
pub const ORDER_WAVELENGTHS: [f64; 3] = [500.0, 552.97, 600.0];
pub const ORDER_SOFT_LIMITS: [f64; 3] = [500.0, 400.0, 500.0];
pub const ORDER_SCALES: [f64; 3] = [1.0, 2.0, 0.5];

pub fn snr(scale: f64, exptime: f64, magnitude: f64, temperature: f64) -> f64 {
    10.0 * scale * exptime.sqrt() * 10f64.powf(-0.2 * (magnitude - 8.0)) * temperature / 5000.0
}

pub fn rv_precision(scale: f64, exptime: f64, magnitude: f64, temperature: f64) -> f64 {
    1000.0 / snr(scale, exptime, magnitude, temperature)
}

fn grid(f: impl Fn(f64, f64, f64) -> f64) -> PerformanceGrid {
    let shape = (EXPTIME.len(), MAGNITUDE.len(), TEMPERATURE.len());
    let values = Array3::from_shape_fn(shape, |(i, j, k)| f(EXPTIME[i], MAGNITUDE[j], TEMPERATURE[k]));
    PerformanceGrid::new(values).expect("synthetic grid is valid")
}

pub fn store() -> MemoryGridStore {
    let order_table = OrderTable::new(
        ORDER_NUMBERS.to_vec(),
        ORDER_WAVELENGTHS.to_vec(),
        ORDER_SOFT_LIMITS.to_vec(),
    )
    .expect("synthetic order table is valid");

    let order_grids = ORDER_SCALES
        .iter()
        .map(|&scale| OrderGrids {
            rv_precision: grid(|t, v, temp| rv_precision(scale, t, v, temp)),
            snr: grid(|t, v, temp| snr(scale, t, v, temp)),
        })
        .collect();

    MemoryGridStore::new(
        GridAxis::new(EXPTIME).expect("valid axis"),
        GridAxis::new(MAGNITUDE).expect("valid axis"),
        GridAxis::new(TEMPERATURE).expect("valid axis"),
        grid(|t, v, temp| rv_precision(1.0, t, v, temp)),
        order_table,
        order_grids,
    )
    .expect("synthetic store is valid")
}

pub fn target(temperature: f64, magnitude: f64) -> Target {
    Target::new(ThermodynamicTemperature::new::<kelvin>(temperature), magnitude)
}

pub fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

pub fn nm(value: f64) -> Length {
    Length::new::<nanometer>(value)
}

pub fn mps(value: f64) -> Velocity {
    Velocity::new::<meter_per_second>(value)
}
