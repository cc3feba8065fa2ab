//! Estimate the noise floor of a residual signal as a confidence interval
//! around its mean.
//!
//! Samples inside the band are treated as baseline noise, anything well outside
//! of it as a candidate event. The estimate assumes the residual is stationary:
//! it must be computed on a signal whose drift has already been removed (see
//! [`detrend`](crate::detrend::detrend)). This is not checked. A drifting input
//! inflates the standard error and produces a band that is meaningless as a
//! noise floor.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SignalError;
use crate::statistics::{mean, standard_error, t_critical};

pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// The confidence interval of the mean of a residual signal
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoiseBand {
    /// The lower edge of the interval
    pub low: f64,
    /// The upper edge of the interval
    pub high: f64,
    pub mean: f64,
    /// The standard error of the mean
    pub standard_error: f64,
    pub degrees_of_freedom: usize,
}

impl NoiseBand {
    pub fn half_width(&self) -> f64 {
        (self.high - self.low) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// The band as the `(low, high, mean, standard error, degrees of freedom)` tuple
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, usize) {
        (
            self.low,
            self.high,
            self.mean,
            self.standard_error,
            self.degrees_of_freedom,
        )
    }
}

impl fmt::Display for NoiseBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "NoiseBand({}, {}, {}, {}, {})",
            self.low, self.high, self.mean, self.standard_error, self.degrees_of_freedom
        )
    }
}

/// Compute the two-sided Student's t confidence interval of the mean of `residual`
/// at the `confidence` level.
///
/// `residual` must already have its drift removed.
///
/// # Errors
/// - [`SignalError::NumericalError`] if `residual` has fewer than two samples
/// - [`SignalError::InvalidParameter`] if `confidence` is not strictly between 0 and 1
pub fn estimate_noise_band(residual: &[f64], confidence: f64) -> Result<NoiseBand, SignalError> {
    let n = residual.len();
    if n <= 1 {
        return Err(SignalError::numerical(format!(
            "The standard error of {n} samples is undefined"
        )));
    }
    let m = mean(residual);
    let s = standard_error(residual)?;
    let degrees_of_freedom = n - 1;
    let h = s * t_critical(confidence, degrees_of_freedom as f64)?;
    log::debug!("Noise band at {confidence} confidence: mean {m}, half width {h} over {n} samples");
    Ok(NoiseBand {
        low: m - h,
        high: m + h,
        mean: m,
        standard_error: s,
        degrees_of_freedom,
    })
}
