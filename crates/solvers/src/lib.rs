//! Inverse solvers for the exposure-time calculator.
//!
//! # Solvers
//!
//! - [`exposure_scan`]: smallest exposure time on a fixed candidate ladder
//!   that meets a performance goal, bounded by a ceiling

pub mod exposure_scan;
