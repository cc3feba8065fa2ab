//! `partsignal` is a library for counting particles in voltage traces recorded
//! by a particle-detection instrument.
//!
//! A trace is cleaned with a binned [`moving_average`](crate::smooth::moving_average),
//! its slow instrumental drift is removed by subtracting a least squares
//! polynomial (see [`crate::detrend`]), and the remaining excursions are counted
//! with a hysteresis [`PeakDetector`]. The [`Pipeline`] composes these stages
//! and records every intermediate channel in a [`PipelineResult`].
//!
//! The [`crate::filter`] sub-module provides zero-phase Butterworth filtering
//! and [`crate::noise`] estimates the noise floor of a residual signal.
//!
//! # Usage
//! ```
//! use partsignal::{Pipeline, PipelineParameters};
//!
//! let time: Vec<f64> = (0..200).map(|i| i as f64 * 0.01).collect();
//! let input = vec![0.0; 200];
//! let output: Vec<f64> = time
//!     .iter()
//!     .map(|t| 0.1 * t - 0.05 * (-((t - 1.0) / 0.05).powi(2)).exp())
//!     .collect();
//!
//! let params = PipelineParameters::default().bin_size(2).degree(1).delta(0.01);
//! let result = Pipeline::new(params).run(&time, &input, &output).unwrap();
//! assert_eq!(result.number_of_particles(), 1);
//! for particle in result.particles() {
//!     println!("{}", particle);
//! }
//! ```
pub mod arrayops;
pub mod detrend;
pub mod error;
pub mod filter;
pub mod noise;
pub mod peak;
pub mod peak_detector;
pub mod pipeline;
pub mod prelude;
pub mod smooth;
pub mod statistics;
pub mod text;

#[cfg(test)]
mod test_data;

pub use crate::detrend::{detrend, polynomial_fit, Polynomial};
pub use crate::error::{PipelineError, PipelineStage, SignalError};
pub use crate::filter::{bandpass_filter, FilterKind};
pub use crate::noise::{estimate_noise_band, NoiseBand};
pub use crate::peak::{PeakEvent, PeakKind};
pub use crate::peak_detector::{find_peaks, PeakDetector, PeakSet};
pub use crate::pipeline::{ChannelSet, Pipeline, PipelineParameters, PipelineResult};
pub use crate::smooth::moving_average;
