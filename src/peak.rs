use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of the baseline an event lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PeakKind {
    Maximum,
    Minimum,
}

impl PeakKind {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Maximum => Self::Minimum,
            Self::Minimum => Self::Maximum,
        }
    }

    /// Whether `candidate` is further in this direction than `current`
    #[inline]
    pub fn improves(self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Maximum => candidate > current,
            Self::Minimum => candidate < current,
        }
    }

    /// How far `value` has retreated from `extremum`, positive when moving
    /// away from the extremum
    #[inline]
    pub fn retreat(self, extremum: f64, value: f64) -> f64 {
        match self {
            Self::Maximum => extremum - value,
            Self::Minimum => value - extremum,
        }
    }
}

impl fmt::Display for PeakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeakKind::Maximum => f.write_str("maximum"),
            PeakKind::Minimum => f.write_str("minimum"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// A detected local extremum, a particle passing the sensor.
pub struct PeakEvent {
    /// The position of the event on the time axis
    pub x: f64,
    /// The signal value at the event
    pub y: f64,
    /// The index of the sample the event was read from
    pub index: usize,
}

impl PeakEvent {
    pub fn new(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index }
    }

    pub fn as_pair(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<PeakEvent> for (f64, f64) {
    fn from(peak: PeakEvent) -> Self {
        peak.as_pair()
    }
}

impl fmt::Display for PeakEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PeakEvent({}, {}, {})", self.x, self.y, self.index)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_direction_helpers() {
        assert_eq!(PeakKind::Maximum.opposite(), PeakKind::Minimum);
        assert!(PeakKind::Maximum.improves(2.0, 1.0));
        assert!(PeakKind::Minimum.improves(1.0, 2.0));
        assert_eq!(PeakKind::Maximum.retreat(3.0, 2.5), 0.5);
        assert_eq!(PeakKind::Minimum.retreat(-1.0, 0.5), 1.5);
    }

    #[test]
    fn test_conversion() {
        let peak = PeakEvent::new(0.25, -0.01, 4);
        let pair: (f64, f64) = peak.into();
        assert_eq!(pair, (0.25, -0.01));
        assert_eq!(peak.to_string(), "PeakEvent(0.25, -0.01, 4)");
    }
}
