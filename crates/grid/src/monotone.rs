use thiserror::Error;

/// Errors that can occur when fitting a [`MonotoneCubic`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonotoneCubicError {
    #[error("x and y must have the same length ({x_len} != {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("need at least 2 points, got {len}")]
    TooShort { len: usize },

    #[error("point {index} is not finite")]
    NonFinite { index: usize },

    #[error("x is not strictly increasing at point {index}")]
    NotIncreasing { index: usize },
}

/// Shape-preserving piecewise cubic Hermite interpolant.
///
/// Slopes are chosen with the Fritsch–Carlson weighted harmonic mean, so the
/// curve is monotone wherever the data are and never overshoots between
/// samples. Each segment stores its polynomial as
///
/// ```text
/// S(x) = a + b·dx + c·dx² + d·dx³,   dx = x − x_k
/// ```
///
/// Outside `[x_0, x_{n-1}]` the boundary segment's polynomial is extended.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotoneCubic {
    x: Vec<f64>,
    y: Vec<f64>,
    coeffs: Vec<[f64; 4]>,
}

impl MonotoneCubic {
    /// Fits the interpolant through `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ, fewer than two points are
    /// given, any value is not finite, or `x` is not strictly increasing.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, MonotoneCubicError> {
        if x.len() != y.len() {
            return Err(MonotoneCubicError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(MonotoneCubicError::TooShort { len: x.len() });
        }
        if let Some(index) = (0..x.len()).find(|&i| !x[i].is_finite() || !y[i].is_finite()) {
            return Err(MonotoneCubicError::NonFinite { index });
        }
        if let Some(index) = (1..x.len()).find(|&i| x[i] <= x[i - 1]) {
            return Err(MonotoneCubicError::NotIncreasing { index });
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = y
            .windows(2)
            .zip(&h)
            .map(|(w, h)| (w[1] - w[0]) / h)
            .collect();
        let slopes = slopes(&h, &delta);

        let coeffs = (0..h.len())
            .map(|k| {
                let (h, delta) = (h[k], delta[k]);
                let (d0, d1) = (slopes[k], slopes[k + 1]);
                [
                    y[k],
                    d0,
                    (3.0 * delta - 2.0 * d0 - d1) / h,
                    (d0 + d1 - 2.0 * delta) / (h * h),
                ]
            })
            .collect();

        Ok(Self { x, y, coeffs })
    }

    /// Evaluates the interpolant at `x`.
    ///
    /// Sample abscissae map exactly to their ordinates.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let segment = match self.x.binary_search_by(|node| node.total_cmp(&x)) {
            Ok(index) => return self.y[index],
            Err(insert) => insert.clamp(1, self.coeffs.len()) - 1,
        };

        let dx = x - self.x[segment];
        let [a, b, c, d] = self.coeffs[segment];
        a + dx * (b + dx * (c + dx * d))
    }
}

/// Computes node slopes from segment widths and secant slopes.
fn slopes(h: &[f64], delta: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;

    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut d = vec![0.0; n];

    for k in 1..n - 1 {
        let (h0, h1) = (h[k - 1], h[k]);
        let (s0, s1) = (delta[k - 1], delta[k]);
        if s0 * s1 > 0.0 {
            let w0 = 2.0 * h1 + h0;
            let w1 = h1 + 2.0 * h0;
            d[k] = (w0 + w1) / (w0 / s0 + w1 / s1);
        }
    }

    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);

    d
}

/// One-sided three-point end slope, limited to preserve shape.
fn end_slope(h0: f64, h1: f64, s0: f64, s1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * s0 - h0 * s1) / (h0 + h1);

    if d.signum() != s0.signum() || s0 == 0.0 {
        0.0
    } else if s0.signum() != s1.signum() && d.abs() > 3.0 * s0.abs() {
        3.0 * s0
    } else {
        d
    }
}
