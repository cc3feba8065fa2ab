//! Run the full particle counting procedure over one acquisition.
//!
//! The stages run in a fixed order over the output channel:
//!
//! 1. Smooth with a binned [`moving_average`] to suppress rare spikes
//! 2. Fit a polynomial to the smoothed channel and subtract it to remove
//!    instrumental drift
//! 3. Detect peaks in the adjusted channel, keeping either the maxima or
//!    the minima as the particles
//! 4. Optionally, estimate the noise band of the adjusted channel
//!
//! Any failure aborts the run with a [`PipelineError`] naming the stage
//! that failed.
use std::fmt;

use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arrayops::{is_strictly_increasing, mean_line};
use crate::detrend::{polynomial_fit, subtract};
use crate::error::{check_aligned, PipelineError, PipelineStage, SignalError};
use crate::noise::{estimate_noise_band, NoiseBand};
use crate::peak::{PeakEvent, PeakKind};
use crate::peak_detector::{PeakDetector, PeakSet, DEFAULT_DELTA};
use crate::smooth::moving_average;

pub const DEFAULT_BIN_SIZE: usize = 20;
pub const DEFAULT_DEGREE: usize = 3;

pub const TIME_CHANNEL: &str = "X_Value";
pub const INPUT_CHANNEL: &str = "Voltage_0";
pub const OUTPUT_CHANNEL: &str = "Voltage_1";

/// The names [`PipelineResult::field`] answers to, in reporting order
pub const FIELD_NAMES: [&str; 15] = [
    "time",
    "raw input",
    "input ave",
    "raw output",
    "output ave",
    "smoothed output",
    "polyfit to output",
    "output adjusted",
    "particles",
    "number of particles",
    "bin size",
    "deg",
    "delta",
    "max",
    "noise band",
];

/// A collection of named, equal length channels in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSet {
    names: Vec<String>,
    channels: Vec<Vec<f64>>,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel, replacing any existing channel with the same name
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.channels[i] = values,
            None => {
                self.names.push(name);
                self.channels.push(values);
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.channels[i].as_slice())
    }

    /// Like [`ChannelSet::get`], but a missing channel is an error
    pub fn require(&self, name: &str) -> Result<&[f64], SignalError> {
        self.get(name)
            .ok_or_else(|| SignalError::MissingChannel(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(self.channels.iter())
            .map(|(n, c)| (n.as_str(), c.as_slice()))
    }

    /// The number of channels
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The tuning parameters of a [`Pipeline`] run.
///
/// The defaults match the acquisition setup the procedure was developed on:
/// bins of 20 samples, a cubic drift model, a peak threshold of 0.004 and
/// particles counted as minima.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineParameters {
    pub bin_size: usize,
    pub degree: usize,
    pub delta: f64,
    /// Count the maxima as particles instead of the minima
    pub maxima: bool,
    /// When set, estimate the noise band of the adjusted channel at this confidence level
    pub noise_confidence: Option<f64>,
    pub time_channel: String,
    pub input_channel: String,
    pub output_channel: String,
}

impl Default for PipelineParameters {
    fn default() -> Self {
        Self {
            bin_size: DEFAULT_BIN_SIZE,
            degree: DEFAULT_DEGREE,
            delta: DEFAULT_DELTA,
            maxima: false,
            noise_confidence: None,
            time_channel: TIME_CHANNEL.to_string(),
            input_channel: INPUT_CHANNEL.to_string(),
            output_channel: OUTPUT_CHANNEL.to_string(),
        }
    }
}

impl PipelineParameters {
    pub fn bin_size(mut self, bin_size: usize) -> Self {
        self.bin_size = bin_size;
        self
    }

    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    pub fn delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn maxima(mut self, maxima: bool) -> Self {
        self.maxima = maxima;
        self
    }

    pub fn noise_confidence(mut self, confidence: Option<f64>) -> Self {
        self.noise_confidence = confidence;
        self
    }

    pub fn channels(
        mut self,
        time: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.time_channel = time.into();
        self.input_channel = input.into();
        self.output_channel = output.into();
        self
    }

    /// Which kind of extremum is counted as a particle
    pub fn particle_kind(&self) -> PeakKind {
        if self.maxima {
            PeakKind::Maximum
        } else {
            PeakKind::Minimum
        }
    }
}

/// A single value of a [`PipelineResult`], looked up by name
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultField<'a> {
    Series(&'a [f64]),
    Events(&'a [PeakEvent]),
    Count(usize),
    Value(f64),
    Flag(bool),
    Band(Option<&'a NoiseBand>),
}

impl fmt::Display for ResultField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultField::Series(values) => write!(f, "{values:?}"),
            ResultField::Events(events) => {
                let pairs: Vec<(f64, f64)> = events.iter().map(|e| e.as_pair()).collect();
                write!(f, "{pairs:?}")
            }
            ResultField::Count(n) => write!(f, "{n}"),
            ResultField::Value(v) => write!(f, "{v}"),
            ResultField::Flag(b) => write!(f, "{b}"),
            ResultField::Band(Some(band)) => write!(f, "{band}"),
            ResultField::Band(None) => f.write_str("None"),
        }
    }
}

/// The record of one pipeline run: every intermediate channel, the detected
/// particles and the parameters that produced them
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineResult {
    time: Vec<f64>,
    raw_input: Vec<f64>,
    input_average: Vec<f64>,
    raw_output: Vec<f64>,
    output_average: Vec<f64>,
    smoothed_output: Vec<f64>,
    drift: Vec<f64>,
    adjusted_output: Vec<f64>,
    peaks: PeakSet,
    particles: Vec<PeakEvent>,
    noise_band: Option<NoiseBand>,
    parameters: PipelineParameters,
}

impl PipelineResult {
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn raw_input(&self) -> &[f64] {
        &self.raw_input
    }

    /// The mean of the input channel, repeated for every sample
    pub fn input_average(&self) -> &[f64] {
        &self.input_average
    }

    pub fn raw_output(&self) -> &[f64] {
        &self.raw_output
    }

    /// The mean of the output channel, repeated for every sample
    pub fn output_average(&self) -> &[f64] {
        &self.output_average
    }

    pub fn smoothed_output(&self) -> &[f64] {
        &self.smoothed_output
    }

    /// The polynomial fitted to the smoothed output
    pub fn drift(&self) -> &[f64] {
        &self.drift
    }

    /// The smoothed output with the drift subtracted
    pub fn adjusted_output(&self) -> &[f64] {
        &self.adjusted_output
    }

    /// Both kinds of extrema found in the adjusted output
    pub fn peaks(&self) -> &PeakSet {
        &self.peaks
    }

    /// The extrema counted as particles
    pub fn particles(&self) -> &[PeakEvent] {
        &self.particles
    }

    pub fn number_of_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn noise_band(&self) -> Option<&NoiseBand> {
        self.noise_band.as_ref()
    }

    pub fn parameters(&self) -> &PipelineParameters {
        &self.parameters
    }

    /// Look up a value by its reporting name, see [`FIELD_NAMES`].
    ///
    /// The raw channels also answer to the channel names they were read from.
    pub fn field(&self, name: &str) -> Option<ResultField<'_>> {
        let value = match name {
            "time" => ResultField::Series(&self.time),
            "raw input" => ResultField::Series(&self.raw_input),
            "input ave" => ResultField::Series(&self.input_average),
            "raw output" => ResultField::Series(&self.raw_output),
            "output ave" => ResultField::Series(&self.output_average),
            "smoothed output" => ResultField::Series(&self.smoothed_output),
            "polyfit to output" => ResultField::Series(&self.drift),
            "output adjusted" => ResultField::Series(&self.adjusted_output),
            "particles" => ResultField::Events(&self.particles),
            "number of particles" => ResultField::Count(self.particles.len()),
            "bin size" => ResultField::Count(self.parameters.bin_size),
            "deg" => ResultField::Count(self.parameters.degree),
            "delta" => ResultField::Value(self.parameters.delta),
            "max" => ResultField::Flag(self.parameters.maxima),
            "noise band" => ResultField::Band(self.noise_band.as_ref()),
            _ if name == self.parameters.time_channel => ResultField::Series(&self.time),
            _ if name == self.parameters.input_channel => ResultField::Series(&self.raw_input),
            _ if name == self.parameters.output_channel => ResultField::Series(&self.raw_output),
            _ => return None,
        };
        Some(value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, ResultField<'_>)> {
        FIELD_NAMES
            .into_iter()
            .filter_map(move |name| self.field(name).map(|v| (name, v)))
    }
}

/// Counts particles in acquisitions with a fixed set of [`PipelineParameters`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    pub parameters: PipelineParameters,
}

impl Pipeline {
    pub fn new(parameters: PipelineParameters) -> Self {
        Self { parameters }
    }

    /// Process one acquisition given as the time axis, input channel and output
    /// channel, all of the same length.
    pub fn run(
        &self,
        time: &[f64],
        input: &[f64],
        output: &[f64],
    ) -> Result<PipelineResult, PipelineError> {
        let params = &self.parameters;
        let stage = |at: PipelineStage| move |err: SignalError| PipelineError::new(at, err);

        check_aligned(time.len(), output.len()).map_err(stage(PipelineStage::Validation))?;
        check_aligned(time.len(), input.len()).map_err(stage(PipelineStage::Validation))?;
        if !is_strictly_increasing(time) {
            warn!("The time axis is not strictly increasing, drift fits may be unreliable");
        }

        let smoothed_output =
            moving_average(output, params.bin_size).map_err(stage(PipelineStage::Smoothing))?;
        debug!(
            "Smoothed {} samples with bins of {}",
            output.len(),
            params.bin_size
        );

        let drift = polynomial_fit(time, &smoothed_output, params.degree)
            .map_err(stage(PipelineStage::Detrending))?;
        let adjusted_output = subtract(&smoothed_output, &drift);
        debug!("Removed a degree {} drift", params.degree);

        let peaks = PeakDetector::new(params.delta)
            .and_then(|detector| detector.detect(time, &adjusted_output))
            .map_err(stage(PipelineStage::PeakDetection))?;
        let kind = params.particle_kind();
        let particles = peaks.select(kind).to_vec();
        if particles.is_empty() {
            warn!(
                "No {kind} events were found with delta {}, the threshold may be too large",
                params.delta
            );
        } else {
            debug!("Counted {} particles as {kind} events", particles.len());
        }

        let noise_band = params
            .noise_confidence
            .map(|confidence| estimate_noise_band(&adjusted_output, confidence))
            .transpose()
            .map_err(stage(PipelineStage::NoiseEstimation))?;

        Ok(PipelineResult {
            time: time.to_vec(),
            raw_input: input.to_vec(),
            input_average: mean_line(input),
            raw_output: output.to_vec(),
            output_average: mean_line(output),
            smoothed_output,
            drift,
            adjusted_output,
            peaks,
            particles,
            noise_band,
            parameters: params.clone(),
        })
    }

    /// Process an acquisition, looking up its channels by the configured names
    pub fn run_on_channels(&self, channels: &ChannelSet) -> Result<PipelineResult, PipelineError> {
        let params = &self.parameters;
        let lookup = |name: &str| {
            channels
                .require(name)
                .map_err(|err| PipelineError::new(PipelineStage::Validation, err))
        };
        let time = lookup(&params.time_channel)?;
        let input = lookup(&params.input_channel)?;
        let output = lookup(&params.output_channel)?;
        self.run(time, input, output)
    }
}

/// A convenience function that runs the pipeline with `parameters`
pub fn process(
    time: &[f64],
    input: &[f64],
    output: &[f64],
    parameters: PipelineParameters,
) -> Result<PipelineResult, PipelineError> {
    Pipeline::new(parameters).run(time, input, output)
}
