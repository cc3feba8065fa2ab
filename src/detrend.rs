//! Remove slow instrumental drift by subtracting a least squares polynomial.
//!
//! A polynomial of low degree captures the baseline wander of a trace while
//! leaving short features such as particle events in the residual. Raising the
//! degree lets the fit follow faster variation, which eventually starts eating
//! into the events themselves, so the degree is left to the caller.
use nalgebra::{DMatrix, DVector};

use crate::error::{check_aligned, SignalError};

/// A polynomial in a centred and scaled abscissa.
///
/// The fit is solved over `(x - center) / scale`, which maps the fitted range
/// onto `[-1, 1]` and keeps the Vandermonde system well conditioned even when
/// `x` holds large absolute times.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    center: f64,
    scale: f64,
}

impl Polynomial {
    /// Coefficients are in ascending order of power of the scaled abscissa
    pub fn new(coefficients: Vec<f64>, center: f64, scale: f64) -> Self {
        Self {
            coefficients,
            center,
            scale,
        }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.coefficients.iter()
    }

    /// Evaluate the polynomial at a single point using Horner's method
    pub fn eval_at(&self, x: f64) -> f64 {
        let u = (x - self.center) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * u + *c)
    }

    pub fn eval(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self.eval_at(*v)).collect()
    }
}

impl AsRef<[f64]> for Polynomial {
    fn as_ref(&self) -> &[f64] {
        &self.coefficients
    }
}

fn abscissa_scaling(x: &[f64]) -> (f64, f64) {
    let (lo, hi) = crate::arrayops::minmax(x);
    let center = (lo + hi) / 2.0;
    let scale = (hi - lo) / 2.0;
    if scale > 0.0 {
        (center, scale)
    } else {
        (center, 1.0)
    }
}

/// Least squares fit of a polynomial of `degree` to `(x, y)`.
///
/// # Errors
/// - [`SignalError::ShapeMismatch`] if `x` and `y` differ in length
/// - [`SignalError::NumericalError`] if `degree >= x.len()`, if any value is not
///   finite, or if the design matrix is rank deficient, as happens when there
///   are fewer distinct `x` values than coefficients
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial, SignalError> {
    check_aligned(x.len(), y.len())?;
    let nr = x.len();
    if degree >= nr {
        return Err(SignalError::numerical(format!(
            "A degree {degree} polynomial cannot be fit to {nr} points"
        )));
    }
    let nc = degree + 1;
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(SignalError::numerical(
            "Cannot fit a polynomial to non-finite values",
        ));
    }

    let (center, scale) = abscissa_scaling(x);

    // Vandermonde system in the scaled abscissa
    let mut system = DMatrix::<f64>::zeros(nr, nc);
    x.iter().enumerate().for_each(|(row_i, x)| {
        let u = (*x - center) / scale;
        let mut term = 1.0;
        (0..nc).for_each(|col_j| {
            system[(row_i, col_j)] = term;
            term *= u;
        });
    });

    let beta = DVector::from_row_slice(y);
    let decomp = nalgebra::linalg::SVD::new(system, true, true);

    let largest = decomp.singular_values.max();
    let tolerance = largest * f64::EPSILON * nr.max(nc) as f64;
    let rank = decomp.rank(tolerance);
    if rank < nc {
        return Err(SignalError::numerical(format!(
            "The polynomial fit is singular, the design matrix has rank {rank} but {nc} coefficients are required"
        )));
    }

    let coefficients: Vec<f64> = match decomp.solve(&beta, tolerance) {
        Ok(val) => val.data.into(),
        Err(e) => return Err(SignalError::numerical(e)),
    };
    log::trace!("Fit degree {degree} polynomial {coefficients:?} over {nr} points");
    Ok(Polynomial::new(coefficients, center, scale))
}

/// Fit a polynomial of `degree` to `(x, y)` and evaluate it at every `x`,
/// producing a sequence of the same length as the input.
///
/// See [`fit_polynomial`] for failure conditions.
pub fn polynomial_fit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>, SignalError> {
    let poly = fit_polynomial(x, y, degree)?;
    Ok(poly.eval(x))
}

/// Subtract the best fit polynomial of `degree` from `y`, returning the residual
pub fn detrend(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>, SignalError> {
    let trend = polynomial_fit(x, y, degree)?;
    Ok(subtract(y, &trend))
}

pub(crate) fn subtract(y: &[f64], trend: &[f64]) -> Vec<f64> {
    y.iter().zip(trend.iter()).map(|(a, b)| *a - *b).collect()
}
