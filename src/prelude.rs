pub use crate::filter::{Cutoff, FilterConfig, TransferFunction};
pub use crate::peak_detector::PeakDetectorBuilder;
pub use crate::pipeline::ResultField;
pub use crate::text::ChannelTableReader;
