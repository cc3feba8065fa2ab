//! Smooth a signal by replacing fixed-width bins of samples with their mean.
//!
//! The bins are laid end to end from the first sample. When the signal length
//! is not a multiple of the bin width, the final bin is completed by repeating
//! the last sample, so the last bin's mean leans towards that sample.
use std::fmt::Debug;

use num_traits::{Float, FromPrimitive};

use crate::arrayops::mean;
use crate::error::{check_aligned, SignalError};

/// Iterates over the means of consecutive bins of `window_size` samples,
/// completing the last bin with copies of the final sample.
#[derive(Debug, Clone)]
struct BinMeans<'a, F: Float> {
    data: &'a [F],
    window_size: usize,
    divisor: F,
    offset: usize,
}

impl<'a, F: Float + FromPrimitive> BinMeans<'a, F> {
    fn new(data: &'a [F], window_size: usize) -> Self {
        Self {
            data,
            window_size,
            divisor: F::from_usize(window_size).unwrap(),
            offset: 0,
        }
    }
}

impl<F: Float + FromPrimitive> Iterator for BinMeans<'_, F> {
    /// The bin's mean and the number of real samples it covers
    type Item = (F, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.data.len() {
            return None;
        }
        let end = (self.offset + self.window_size).min(self.data.len());
        let chunk = &self.data[self.offset..end];
        let missing = self.window_size - chunk.len();
        let last = *self.data.last()?;
        let total = chunk.iter().fold(F::zero(), |acc, v| acc + *v)
            + last * F::from_usize(missing).unwrap();
        self.offset = end;
        Some((total / self.divisor, chunk.len()))
    }
}

/// Replace every sample with the mean of its bin of `window_size` samples,
/// returning a new sequence with the same length as `values`.
///
/// A `window_size` at least as long as the signal collapses to one bin, the
/// whole-signal mean repeated. An empty signal produces an empty result.
///
/// # Errors
/// [`SignalError::InvalidParameter`] if `window_size` is zero.
pub fn moving_average<F: Float + FromPrimitive + Debug>(
    values: &[F],
    window_size: usize,
) -> Result<Vec<F>, SignalError> {
    if window_size == 0 {
        return Err(SignalError::invalid_parameter(
            "The moving average window size must be at least 1",
        ));
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }
    if window_size >= values.len() {
        return Ok(vec![mean(values); values.len()]);
    }
    let mut smoothed = Vec::with_capacity(values.len());
    for (bin_mean, covered) in BinMeans::new(values, window_size) {
        smoothed.extend(std::iter::repeat(bin_mean).take(covered));
    }
    Ok(smoothed)
}

/// Write the moving average of `values` into `destination`, which must be the
/// same length as `values`.
pub fn moving_average_into<F: Float + FromPrimitive + Debug>(
    values: &[F],
    destination: &mut [F],
    window_size: usize,
) -> Result<(), SignalError> {
    check_aligned(values.len(), destination.len())?;
    let smoothed = moving_average(values, window_size)?;
    destination.copy_from_slice(&smoothed);
    Ok(())
}
