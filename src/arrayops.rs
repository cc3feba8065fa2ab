use num_traits::{Float, FromPrimitive, ToPrimitive};

/// Build an evenly spaced axis of `count` points starting at `start`, such as a
/// time axis sampled every `step` seconds.
pub fn gridspace<T: Float + FromPrimitive>(start: T, step: T, count: usize) -> Vec<T> {
    (0..count)
        .map(|i| start + T::from_usize(i).unwrap() * step)
        .collect()
}

/// The smallest and largest values in `values`
pub fn minmax<T: Float>(values: &[T]) -> (T, T) {
    let mut max = -T::infinity();
    let mut min = T::infinity();

    for v in values.iter() {
        if *v > max {
            max = *v;
        }
        if *v < min {
            min = *v
        }
    }
    (min, max)
}

pub fn mean<T: Float + FromPrimitive>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    values.iter().fold(T::zero(), |acc, v| acc + *v) / T::from_usize(values.len()).unwrap()
}

/// A flat line at the mean of `values` with the same length, for overlaying
/// on a plot of the channel
pub fn mean_line<T: Float + FromPrimitive>(values: &[T]) -> Vec<T> {
    vec![mean(values); values.len()]
}

/// A flat line at the largest value of `values` with the same length
pub fn max_line<T: Float>(values: &[T]) -> Vec<T> {
    vec![minmax(values).1; values.len()]
}

/// A flat line at the smallest value of `values` with the same length
pub fn min_line<T: Float>(values: &[T]) -> Vec<T> {
    vec![minmax(values).0; values.len()]
}

/// Check if the values in `it` are strictly ascending
pub fn is_strictly_increasing<T: Float>(it: &[T]) -> bool {
    it.windows(2).all(|w| w[0] < w[1])
}

/// The mean spacing between consecutive points of an axis, if it has at least two
pub fn mean_step<T: Float + ToPrimitive>(axis: &[T]) -> Option<f64> {
    let n = axis.len();
    if n < 2 {
        return None;
    }
    let span = (axis[n - 1] - axis[0]).to_f64()?;
    Some(span / (n - 1) as f64)
}
