//! Sample statistics and the Student's t distribution needed to put a
//! confidence interval around the mean of a residual signal.
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use crate::error::SignalError;

pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// The sample standard deviation, with one degree of freedom removed
pub fn sample_standard_deviation(values: &[f64]) -> Result<f64, SignalError> {
    let n = values.len();
    if n <= 1 {
        return Err(SignalError::numerical(format!(
            "The standard deviation of {n} samples is undefined"
        )));
    }
    Ok(values.iter().std_dev())
}

/// The standard error of the mean of `values`
pub fn standard_error(values: &[f64]) -> Result<f64, SignalError> {
    let sd = sample_standard_deviation(values)?;
    Ok(sd / (values.len() as f64).sqrt())
}

/// The standard Student's t distribution with `degrees_of_freedom`
fn standard_t(degrees_of_freedom: f64) -> Result<StudentsT, SignalError> {
    if !(degrees_of_freedom > 0.0) || !degrees_of_freedom.is_finite() {
        return Err(SignalError::invalid_parameter(format!(
            "Degrees of freedom must be positive and finite, received {degrees_of_freedom}"
        )));
    }
    StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| {
        SignalError::invalid_parameter(format!(
            "Cannot build a t distribution with {degrees_of_freedom} degrees of freedom: {e}"
        ))
    })
}

/// The cumulative distribution function of Student's t distribution
pub fn students_t_cdf(t: f64, degrees_of_freedom: f64) -> Result<f64, SignalError> {
    Ok(standard_t(degrees_of_freedom)?.cdf(t))
}

/// The inverse of [`students_t_cdf`].
///
/// # Errors
/// [`SignalError::InvalidParameter`] if `probability` is not strictly between
/// 0 and 1, or `degrees_of_freedom` is not positive.
pub fn students_t_quantile(probability: f64, degrees_of_freedom: f64) -> Result<f64, SignalError> {
    let dist = standard_t(degrees_of_freedom)?;
    if !(probability > 0.0 && probability < 1.0) {
        return Err(SignalError::invalid_parameter(format!(
            "Probability must be between 0 and 1, received {probability}"
        )));
    }
    let t = dist.inverse_cdf(probability);
    if !t.is_finite() {
        return Err(SignalError::numerical(format!(
            "The {probability} quantile with {degrees_of_freedom} degrees of freedom is not finite"
        )));
    }
    Ok(t)
}

/// The two-sided critical value of Student's t distribution for a `confidence`
/// level, i.e. the `(1 + confidence) / 2` quantile
pub fn t_critical(confidence: f64, degrees_of_freedom: f64) -> Result<f64, SignalError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(SignalError::invalid_parameter(format!(
            "Confidence level must be between 0 and 1, received {confidence}"
        )));
    }
    students_t_quantile((1.0 + confidence) / 2.0, degrees_of_freedom)
}
