//! Zero-phase Butterworth filtering for callers who need stronger conditioning
//! than a binned moving average.
//!
//! Filters are designed as cascades of second-order sections, which stay
//! numerically stable at the high orders and very low cutoffs used to strip
//! slow drift. They are applied forwards and then backwards so the output has
//! no phase lag, with the signal edges extended by odd reflection and the
//! filter state started at its steady state to suppress start-up transients.
//!
//! Frequencies are normalized so that 1 is the Nyquist frequency.
use std::fmt;
use std::str::FromStr;

use sci_rs::signal::filter::design::{
    butter_dyn, BaFormatFilter, DigitalFilter, FilterBandType, FilterOutputType, SosFormatFilter,
};
use sci_rs::signal::filter::sosfiltfilt_dyn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SignalError;

pub use sci_rs::signal::filter::design::Sos;

/// The sampling rate of the normalized frequency axis, so the Nyquist frequency is 1
const NORMALIZED_FS: f64 = 2.0;

/// The band a filter passes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterKind {
    Low,
    /// Remove slow variation below the cutoff
    #[default]
    High,
    BandPass,
    BandStop,
}

impl FilterKind {
    pub const fn is_band(&self) -> bool {
        matches!(self, Self::BandPass | Self::BandStop)
    }
}

impl From<FilterKind> for FilterBandType {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Low => FilterBandType::Lowpass,
            FilterKind::High => FilterBandType::Highpass,
            FilterKind::BandPass => FilterBandType::Bandpass,
            FilterKind::BandStop => FilterBandType::Bandstop,
        }
    }
}

impl FromStr for FilterKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "lowpass" => Ok(Self::Low),
            "high" | "highpass" => Ok(Self::High),
            "band" | "bandpass" => Ok(Self::BandPass),
            "stop" | "bandstop" => Ok(Self::BandStop),
            _ => Err(SignalError::invalid_parameter(format!(
                "Unsupported filter kind {s:?}"
            ))),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Low => "low",
            FilterKind::High => "high",
            FilterKind::BandPass => "bandpass",
            FilterKind::BandStop => "bandstop",
        };
        f.write_str(name)
    }
}

/// The critical frequency or frequencies of a filter, normalized to the
/// Nyquist frequency
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cutoff {
    Single(f64),
    Band(f64, f64),
}

impl From<f64> for Cutoff {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<(f64, f64)> for Cutoff {
    fn from(value: (f64, f64)) -> Self {
        Self::Band(value.0, value.1)
    }
}

/// The numerator `b` and denominator `a` polynomials of a digital filter, in
/// descending powers of `z`
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl TransferFunction {
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        Self { b, a }
    }

    /// The number of coefficients of the longer polynomial
    pub fn len(&self) -> usize {
        self.a.len().max(self.b.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_frequency(w: f64) -> Result<f64, SignalError> {
    if w > 0.0 && w < 1.0 {
        Ok(w)
    } else {
        Err(SignalError::invalid_parameter(format!(
            "Normalized cutoff frequencies must lie strictly between 0 and 1, received {w}"
        )))
    }
}

/// Check the filter request and produce the critical frequencies to design with
fn critical_frequencies(
    order: usize,
    cutoff: Cutoff,
    kind: FilterKind,
) -> Result<Vec<f64>, SignalError> {
    if order == 0 {
        return Err(SignalError::invalid_parameter(
            "The filter order must be at least 1",
        ));
    }
    match (kind, cutoff) {
        (FilterKind::Low | FilterKind::High, Cutoff::Single(w)) => Ok(vec![check_frequency(w)?]),
        (FilterKind::BandPass | FilterKind::BandStop, Cutoff::Band(low, high)) => {
            let (low, high) = (check_frequency(low)?, check_frequency(high)?);
            if low >= high {
                return Err(SignalError::invalid_parameter(format!(
                    "The band's lower edge {low} must be below its upper edge {high}"
                )));
            }
            Ok(vec![low, high])
        }
        (kind, cutoff) => Err(SignalError::invalid_parameter(format!(
            "A {kind} filter cannot use the cutoff {cutoff:?}"
        ))),
    }
}

fn design(
    order: usize,
    cutoff: Cutoff,
    kind: FilterKind,
    output: FilterOutputType,
) -> Result<DigitalFilter<f64>, SignalError> {
    let wn = critical_frequencies(order, cutoff, kind)?;
    Ok(butter_dyn(
        order,
        wn,
        Some(kind.into()),
        Some(false),
        Some(output),
        Some(NORMALIZED_FS),
    ))
}

/// Design a digital Butterworth filter of `order` passing the `kind` band
/// delimited by `cutoff`, as a transfer function.
///
/// # Errors
/// [`SignalError::InvalidParameter`] if `order` is zero, if a band kind is not
/// given a `(low, high)` pair or a low/high kind is given one, or if the
/// frequencies do not satisfy `0 < low < high < 1`.
pub fn butterworth(
    order: usize,
    cutoff: impl Into<Cutoff>,
    kind: FilterKind,
) -> Result<TransferFunction, SignalError> {
    match design(order, cutoff.into(), kind, FilterOutputType::Ba)? {
        DigitalFilter::Ba(BaFormatFilter { b, a }) => Ok(TransferFunction::new(b, a)),
        _ => Err(SignalError::numerical(
            "The filter design did not produce a transfer function",
        )),
    }
}

/// Design the same filter as [`butterworth`] as a cascade of second-order sections
pub fn butterworth_sections(
    order: usize,
    cutoff: impl Into<Cutoff>,
    kind: FilterKind,
) -> Result<Vec<Sos<f64>>, SignalError> {
    match design(order, cutoff.into(), kind, FilterOutputType::Sos)? {
        DigitalFilter::Sos(SosFormatFilter { sos }) => Ok(sos),
        _ => Err(SignalError::numerical(
            "The filter design did not produce second-order sections",
        )),
    }
}

/// The number of samples each edge of the signal is extended by
pub fn padding_length(sections: &[Sos<f64>]) -> usize {
    3 * (2 * sections.len() + 1)
}

/// Apply `sections` forwards and backwards over `values`, producing a zero-phase
/// output of the same length.
///
/// # Errors
/// [`SignalError::InvalidParameter`] if there are no sections, or if `values`
/// is not longer than the [`padding_length`] used to extend each edge.
pub fn filtfilt(sections: &[Sos<f64>], values: &[f64]) -> Result<Vec<f64>, SignalError> {
    if sections.is_empty() {
        return Err(SignalError::invalid_parameter(
            "A filter needs at least one section",
        ));
    }
    let padlen = padding_length(sections);
    let n = values.len();
    if n <= padlen {
        return Err(SignalError::invalid_parameter(format!(
            "The signal must be longer than the {padlen} samples of edge padding, received {n}"
        )));
    }
    Ok(sosfiltfilt_dyn(values.iter(), sections))
}

/// Filter `values` with a zero-phase Butterworth filter of `order` passing the
/// `kind` band delimited by `cutoff`.
///
/// See [`butterworth`] and [`filtfilt`] for failure conditions.
pub fn bandpass_filter(
    values: &[f64],
    order: usize,
    cutoff: impl Into<Cutoff>,
    kind: FilterKind,
) -> Result<Vec<f64>, SignalError> {
    let cutoff: Cutoff = cutoff.into();
    let sections = butterworth_sections(order, cutoff, kind)?;
    log::debug!(
        "Applying order {order} {kind} Butterworth filter at {cutoff:?} as {} sections",
        sections.len()
    );
    filtfilt(&sections, values)
}

/// A reusable filter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterConfig {
    pub order: usize,
    pub cutoff: Cutoff,
    pub kind: FilterKind,
}

impl Default for FilterConfig {
    /// A gentle high-pass that strips very slow drift
    fn default() -> Self {
        Self {
            order: 5,
            cutoff: Cutoff::Single(0.001),
            kind: FilterKind::High,
        }
    }
}

impl FilterConfig {
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn cutoff(mut self, cutoff: impl Into<Cutoff>) -> Self {
        self.cutoff = cutoff.into();
        self
    }

    pub fn kind(mut self, kind: FilterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn design(&self) -> Result<TransferFunction, SignalError> {
        butterworth(self.order, self.cutoff, self.kind)
    }

    pub fn sections(&self) -> Result<Vec<Sos<f64>>, SignalError> {
        butterworth_sections(self.order, self.cutoff, self.kind)
    }

    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>, SignalError> {
        bandpass_filter(values, self.order, self.cutoff, self.kind)
    }
}
