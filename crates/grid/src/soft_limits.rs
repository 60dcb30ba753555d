/// Per-order saturation soft limits of the reference instrument.
///
/// One SNR threshold per tabulated spectral order, in order-table order.
/// Exceeding an order's soft limit risks saturating the detector, so the
/// maximum recommended exposure time is the one at which the most
/// constrained order reaches its limit.
pub const REFERENCE_SOFT_LIMITS: [f64; 95] = [
    497.82248, 500.46307, 499.61078, 495.75638, 495.59677, 497.53268,
    494.92285, 497.87125, 495.24042, 499.50885, 499.4121, 495.15826,
    498.5816, 498.41797, 494.5738, 498.28055, 495.77396, 495.66986,
    497.76923, 495.65466, 495.5136, 494.9543, 497.7236, 496.294,
    494.54578, 492.45773, 493.8629, 495.3245, 496.50537, 497.20462,
    496.3666, 493.56155, 495.66016, 495.95648, 495.29364, 493.72418,
    495.75903, 496.19632, 494.97125, 492.46533, 496.4472, 494.52365,
    493.13345, 494.53046, 495.96414, 494.08124, 491.92264, 494.0127,
    495.47772, 495.2882, 495.43652, 494.86865, 495.158, 495.0169,
    494.81766, 495.0668, 495.3031, 493.20224, 494.71045, 493.0483,
    495.01123, 494.97443, 492.57593, 493.84567, 490.0411, 493.2728,
    491.09906, 494.50082, 493.13843, 494.31946, 494.4462, 491.75977,
    493.00977, 491.4752, 491.64948, 492.39023, 492.10922, 489.91223,
    494.3898, 494.33267, 490.79178, 493.4196, 491.94476, 494.1685,
    492.94263, 494.19852, 489.60358, 492.3478, 490.21204, 493.80936,
    489.8438, 490.6124, 490.24118, 493.70288, 491.47467,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_plausible_snr_thresholds() {
        assert!(REFERENCE_SOFT_LIMITS
            .iter()
            .all(|limit| (480.0..510.0).contains(limit)));
    }
}
