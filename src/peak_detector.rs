//! Find alternating local maxima and minima in a 1D signal with a hysteresis
//! threshold.
//!
//! The detector sweeps the signal once, tracking the most extreme value seen in
//! the direction it is currently searching. An extremum is only reported once
//! the signal has retreated from it by more than `delta`, at which point the
//! search turns around. Wiggles smaller than `delta` never complete an
//! excursion, so `delta` sets the line between noise and events: too small and
//! noise is counted as particles, too large and real particles are missed.
//!
//! Because the search direction strictly alternates, maxima and minima
//! alternate in x as well and no sample is ever reported as both.
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_aligned, SignalError};
use crate::peak::{PeakEvent, PeakKind};

pub const DEFAULT_DELTA: f64 = 0.004;

/// The state of the sweep, carrying the extremum tracked in the current
/// search direction
#[derive(Debug, Clone, Copy, PartialEq)]
enum DetectorState {
    SeekingMaximum(PeakEvent),
    SeekingMinimum(PeakEvent),
}

impl DetectorState {
    fn new(kind: PeakKind, tracked: PeakEvent) -> Self {
        match kind {
            PeakKind::Maximum => Self::SeekingMaximum(tracked),
            PeakKind::Minimum => Self::SeekingMinimum(tracked),
        }
    }

    fn kind(&self) -> PeakKind {
        match self {
            Self::SeekingMaximum(_) => PeakKind::Maximum,
            Self::SeekingMinimum(_) => PeakKind::Minimum,
        }
    }

    fn tracked(&self) -> PeakEvent {
        match self {
            Self::SeekingMaximum(p) | Self::SeekingMinimum(p) => *p,
        }
    }

    /// Consume the next sample, returning the next state and any event the
    /// sample completed
    fn step(self, point: PeakEvent, delta: f64) -> (Self, Option<(PeakKind, PeakEvent)>) {
        let kind = self.kind();
        let tracked = self.tracked();
        if kind.improves(point.y, tracked.y) {
            (Self::new(kind, point), None)
        } else if kind.retreat(tracked.y, point.y) > delta {
            (Self::new(kind.opposite(), point), Some((kind, tracked)))
        } else {
            (self, None)
        }
    }
}

/// The events found by [`PeakDetector::detect`], each list in ascending x
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeakSet {
    pub maxima: Vec<PeakEvent>,
    pub minima: Vec<PeakEvent>,
}

impl PeakSet {
    pub fn select(&self, kind: PeakKind) -> &[PeakEvent] {
        match kind {
            PeakKind::Maximum => &self.maxima,
            PeakKind::Minimum => &self.minima,
        }
    }

    /// Take ownership of one of the event lists
    pub fn into_kind(self, kind: PeakKind) -> Vec<PeakEvent> {
        match kind {
            PeakKind::Maximum => self.maxima,
            PeakKind::Minimum => self.minima,
        }
    }

    /// The total number of events of both kinds
    pub fn len(&self) -> usize {
        self.maxima.len() + self.minima.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty() && self.minima.is_empty()
    }

    fn push(&mut self, kind: PeakKind, peak: PeakEvent) {
        match kind {
            PeakKind::Maximum => self.maxima.push(peak),
            PeakKind::Minimum => self.minima.push(peak),
        }
    }
}

/// A hysteresis peak detector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeakDetector {
    /// The smallest excursion from an extremum that completes an event
    pub delta: f64,
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
        }
    }
}

/// A builder for configuring [`PeakDetector`]
#[derive(Debug, Clone)]
pub struct PeakDetectorBuilder {
    delta: f64,
}

impl Default for PeakDetectorBuilder {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
        }
    }
}

impl PeakDetectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(&mut self, delta: f64) -> &mut Self {
        self.delta = delta;
        self
    }

    pub fn build(&self) -> Result<PeakDetector, SignalError> {
        PeakDetector::new(self.delta)
    }
}

impl PeakDetector {
    /// Create a new detector.
    ///
    /// # Errors
    /// [`SignalError::InvalidParameter`] if `delta` is not a positive finite number.
    /// A zero threshold would turn every sample to sample reversal into an event.
    pub fn new(delta: f64) -> Result<Self, SignalError> {
        if !(delta > 0.0) || !delta.is_finite() {
            return Err(SignalError::invalid_parameter(format!(
                "The peak threshold delta must be positive and finite, received {delta}"
            )));
        }
        Ok(Self { delta })
    }

    pub fn builder() -> PeakDetectorBuilder {
        PeakDetectorBuilder::new()
    }

    /// Find the maxima and minima of `y` sampled at `x`.
    ///
    /// The first sample seeds the search for a maximum. An empty signal yields an
    /// empty [`PeakSet`].
    ///
    /// # Errors
    /// [`SignalError::ShapeMismatch`] if `x` and `y` differ in length, and
    /// [`SignalError::InvalidParameter`] if the detector's `delta` is not positive.
    pub fn detect(&self, x: &[f64], y: &[f64]) -> Result<PeakSet, SignalError> {
        check_aligned(x.len(), y.len())?;
        // The field is public, so it may have been changed since construction
        let delta = Self::new(self.delta)?.delta;

        let mut peaks = PeakSet::default();
        let mut points = x
            .iter()
            .zip(y.iter())
            .enumerate()
            .map(|(i, (x, y))| PeakEvent::new(*x, *y, i));

        let Some(first) = points.next() else {
            return Ok(peaks);
        };

        let mut state = DetectorState::SeekingMaximum(first);
        for point in points {
            let (next, event) = state.step(point, delta);
            if let Some((kind, peak)) = event {
                if log::log_enabled!(log::Level::Trace) {
                    trace!("Found {kind} {peak} with delta {delta}");
                }
                peaks.push(kind, peak);
            }
            state = next;
        }
        debug!(
            "Detected {} maxima and {} minima over {} points with delta {delta}",
            peaks.maxima.len(),
            peaks.minima.len(),
            y.len()
        );
        Ok(peaks)
    }
}

/// A convenience function that detects peaks in `(x, y)` with the threshold
/// `delta`, returning the maxima and minima.
pub fn find_peaks(
    x: &[f64],
    y: &[f64],
    delta: f64,
) -> Result<(Vec<PeakEvent>, Vec<PeakEvent>), SignalError> {
    let detector = PeakDetector::new(delta)?;
    let peaks = detector.detect(x, y)?;
    Ok((peaks.maxima, peaks.minima))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_data::{noisy_sine, particle_trace, time_axis};
    use rstest::rstest;

    fn positions(peaks: &[PeakEvent]) -> Vec<(f64, f64)> {
        peaks.iter().map(|p| p.as_pair()).collect()
    }

    #[test]
    fn test_hand_traced_excursions() {
        let x: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let y = [0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0];
        let (maxima, minima) = find_peaks(&x, &y, 0.5).unwrap();
        assert_eq!(positions(&maxima), vec![(2.0, 2.0), (7.0, 3.0)]);
        assert_eq!(positions(&minima), vec![(4.0, 0.0)]);
        assert_eq!(minima[0].index, 4);
    }

    #[test]
    fn test_increasing_signal_has_no_minima() {
        let x: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v * 0.01).collect();
        let peaks = PeakDetector::new(0.001).unwrap().detect(&x, &y).unwrap();
        assert!(peaks.minima.is_empty());
        assert!(peaks.maxima.is_empty());
    }

    #[test]
    fn test_decreasing_signal_reports_only_the_start() {
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| -v).collect();
        let peaks = PeakDetector::new(0.5).unwrap().detect(&x, &y).unwrap();
        assert!(peaks.minima.is_empty());
        assert_eq!(positions(&peaks.maxima), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_flat_signal() {
        let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let y = vec![1.5; 20];
        let peaks = PeakDetector::default().detect(&x, &y).unwrap();
        assert!(peaks.is_empty());
    }

    #[test]
    fn test_empty_and_single() {
        let peaks = PeakDetector::default().detect(&[], &[]).unwrap();
        assert!(peaks.is_empty());
        let peaks = PeakDetector::default().detect(&[0.0], &[1.0]).unwrap();
        assert!(peaks.is_empty());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_non_positive_delta_rejected(#[case] delta: f64) {
        assert!(matches!(
            PeakDetector::new(delta),
            Err(SignalError::InvalidParameter(_))
        ));
        let detector = PeakDetector { delta };
        assert!(matches!(
            detector.detect(&[0.0, 1.0], &[0.0, 1.0]),
            Err(SignalError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = PeakDetector::default()
            .detect(&[0.0, 1.0, 2.0], &[0.0, 1.0])
            .unwrap_err();
        assert!(matches!(err, SignalError::ShapeMismatch { .. }));
    }

    #[test_log::test]
    fn test_deterministic() {
        let x = time_axis();
        let y = particle_trace();
        let detector = PeakDetector::builder().delta(0.002).build().unwrap();
        let first = detector.detect(&x, &y).unwrap();
        let second = detector.detect(&x, &y).unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_events_alternate_and_ascend() {
        let x = time_axis();
        let y = noisy_sine();
        let peaks = PeakDetector::new(0.001).unwrap().detect(&x, &y).unwrap();
        assert!(peaks.maxima.windows(2).all(|w| w[0].x < w[1].x));
        assert!(peaks.minima.windows(2).all(|w| w[0].x < w[1].x));
        // The first event is always a maximum, then they strictly interleave
        for (i, min) in peaks.minima.iter().enumerate() {
            assert!(peaks.maxima[i].x < min.x);
            if let Some(next) = peaks.maxima.get(i + 1) {
                assert!(min.x < next.x);
            }
        }
        assert!(peaks.maxima.len() - peaks.minima.len() <= 1);
    }

    #[rstest]
    #[case::particles(particle_trace())]
    #[case::sine(noisy_sine())]
    fn test_count_non_increasing_in_delta(#[case] y: Vec<f64>) {
        let x = time_axis();
        let deltas = [0.0005, 0.001, 0.002, 0.003, 0.004, 0.008, 0.016, 0.03, 0.05, 0.1];
        let counts: Vec<usize> = deltas
            .iter()
            .map(|d| PeakDetector::new(*d).unwrap().detect(&x, &y).unwrap().len())
            .collect();
        assert!(
            counts.windows(2).all(|w| w[0] >= w[1]),
            "Counts increased with delta: {counts:?}"
        );
        assert!(counts[0] > *counts.last().unwrap());
    }

    #[test]
    fn test_particle_excursions() {
        let x = time_axis();
        let y = particle_trace();
        let peaks = PeakDetector::new(0.01).unwrap().detect(&x, &y).unwrap();
        assert_eq!(peaks.len(), 10);
        assert_eq!(peaks.select(PeakKind::Minimum).len(), 5);
        assert_eq!(peaks.into_kind(PeakKind::Maximum).len(), 5);
    }
}
