//! Read and write tab-delimited channel tables.
//!
//! A table is an optional preamble, one line of column titles and then rows of
//! numbers, one column per channel.
use std::fs;
use std::io;
use std::io::prelude::*;
use std::path;

use crate::peak::PeakEvent;
use crate::pipeline::{ChannelSet, PipelineResult};

const SEPARATOR: char = '\t';

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Reads a tab-delimited table into a [`ChannelSet`]
#[derive(Debug, Clone)]
pub struct ChannelTableReader {
    /// The number of preamble lines before the column titles
    pub skip_lines: usize,
    /// Columns to drop, e.g. free text annotations
    pub exclusions: Vec<String>,
}

impl Default for ChannelTableReader {
    fn default() -> Self {
        Self {
            skip_lines: 0,
            exclusions: vec!["Comment".to_string()],
        }
    }
}

impl ChannelTableReader {
    pub fn new(skip_lines: usize, exclusions: Vec<String>) -> Self {
        Self {
            skip_lines,
            exclusions,
        }
    }

    pub fn read<R: BufRead>(&self, reader: R) -> io::Result<ChannelSet> {
        let mut lines = reader.lines().skip(self.skip_lines);
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(invalid_data("The table has no column titles".to_string())),
        };
        let columns: Vec<(usize, &str)> = header
            .split(SEPARATOR)
            .map(str::trim)
            .enumerate()
            .filter(|(_, title)| !self.exclusions.iter().any(|e| e == title))
            .collect();

        let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
        for (line_no, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(SEPARATOR).collect();
            for ((j, title), acc) in columns.iter().zip(values.iter_mut()) {
                let token = fields.get(*j).map(|s| s.trim()).unwrap_or_default();
                let value = token.parse::<f64>().map_err(|e| {
                    invalid_data(format!(
                        "Could not parse {token:?} in column {title:?} of row {}: {e}",
                        line_no + 1
                    ))
                })?;
                acc.push(value);
            }
        }

        let mut channels = ChannelSet::new();
        for ((_, title), column) in columns.into_iter().zip(values) {
            channels.insert(title, column);
        }
        log::debug!(
            "Read {} channels from a table with titles {header:?}",
            channels.len()
        );
        Ok(channels)
    }

    pub fn read_path<P: AsRef<path::Path>>(&self, path: P) -> io::Result<ChannelSet> {
        let file = fs::File::open(path)?;
        self.read(io::BufReader::new(file))
    }
}

/// Write the time axis and the output channel at every stage of processing
pub fn write_result_table<W: Write>(result: &PipelineResult, writer: &mut W) -> io::Result<()> {
    writer.write_all(b"time\traw output\tsmoothed output\tpolyfit to output\toutput adjusted\n")?;
    let rows = result
        .time()
        .iter()
        .zip(result.raw_output())
        .zip(result.smoothed_output())
        .zip(result.drift())
        .zip(result.adjusted_output());
    for ((((t, raw), smoothed), drift), adjusted) in rows {
        writeln!(writer, "{t}\t{raw}\t{smoothed}\t{drift}\t{adjusted}")?;
    }
    Ok(())
}

pub fn write_peaks<W: Write>(peaks: &[PeakEvent], writer: &mut W) -> io::Result<()> {
    for peak in peaks {
        writeln!(writer, "{}\t{}", peak.x, peak.y)?;
    }
    Ok(())
}

pub fn to_file<P: AsRef<path::Path>>(result: &PipelineResult, path: P) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_result_table(result, &mut writer)?;
    writer.flush()
}
