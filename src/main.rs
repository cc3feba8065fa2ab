use std::error::Error;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use partsignal::peak_detector::DEFAULT_DELTA;
use partsignal::pipeline::{DEFAULT_BIN_SIZE, DEFAULT_DEGREE};
use partsignal::prelude::*;
use partsignal::text::{write_peaks, write_result_table};
use partsignal::{Pipeline, PipelineParameters};

/// Count the particles in a tab-separated acquisition table
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// The acquisition table to read
    path: PathBuf,

    /// Preamble lines to skip before the column titles
    #[clap(long, default_value_t = 0)]
    skip_lines: usize,

    /// Width of the moving average bins
    #[clap(long, default_value_t = DEFAULT_BIN_SIZE)]
    bin_size: usize,

    /// Minimum excursion a peak must retreat by to be counted
    #[clap(long, default_value_t = DEFAULT_DELTA)]
    delta: f64,

    /// Degree of the drift polynomial
    #[clap(long, default_value_t = DEFAULT_DEGREE)]
    degree: usize,

    /// Count maxima instead of minima
    #[clap(long)]
    maxima: bool,

    /// Write every intermediate channel instead of the particle list
    #[clap(long)]
    table: bool,
}

impl Cli {
    fn parameters(&self) -> PipelineParameters {
        PipelineParameters::default()
            .bin_size(self.bin_size)
            .degree(self.degree)
            .delta(self.delta)
            .maxima(self.maxima)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let reader = ChannelTableReader {
        skip_lines: cli.skip_lines,
        ..Default::default()
    };
    let channels = reader.read_path(&cli.path)?;

    let start = Instant::now();
    let result = Pipeline::new(cli.parameters()).run_on_channels(&channels)?;
    log::info!(
        "Processing took {} milliseconds",
        (Instant::now() - start).as_millis()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.table {
        write_result_table(&result, &mut out)?;
    } else {
        writeln!(out, "Found {} particles", result.number_of_particles())?;
        write_peaks(result.particles(), &mut out)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["partsignal", "trace.txt"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("trace.txt"));
        assert_eq!(cli.skip_lines, 0);
        assert!(!cli.maxima);
        assert!(!cli.table);
        let params = cli.parameters();
        let defaults = PipelineParameters::default();
        assert_eq!(params.bin_size, defaults.bin_size);
        assert_eq!(params.degree, defaults.degree);
        assert_eq!(params.delta, defaults.delta);
        assert_eq!(params.maxima, defaults.maxima);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "partsignal",
            "trace.txt",
            "--skip-lines",
            "3",
            "--bin-size",
            "8",
            "--delta",
            "0.01",
            "--degree",
            "1",
            "--maxima",
            "--table",
        ])
        .unwrap();
        assert_eq!(cli.skip_lines, 3);
        assert!(cli.table);
        let params = cli.parameters();
        assert_eq!(params.bin_size, 8);
        assert_eq!(params.degree, 1);
        assert_eq!(params.delta, 0.01);
        assert!(params.maxima);
    }

    #[test]
    fn test_missing_path_rejected() {
        assert!(Cli::try_parse_from(["partsignal"]).is_err());
        assert!(Cli::try_parse_from(["partsignal", "trace.txt", "--bin-size", "wide"]).is_err());
    }
}
