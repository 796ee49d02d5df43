//! wavpipe CLI
//!
//! Decode a compressed audio file to canonical 16-bit PCM WAV. With one
//! argument the WAV stream goes to stdout (placeholder header sizes, since
//! a pipe cannot be rewound); with two arguments it is written to a file
//! and the header size fields are backpatched.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::info;
use wavpipe_lib::decode::{AudioSource, SymphoniaSource};
use wavpipe_lib::wav::{WavSink, WavWriter};
use wavpipe_lib::Config;

#[derive(Parser)]
#[command(name = "wavpipe")]
#[command(about = "Decode compressed audio to WAV", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file path (MP3 or any other supported bitstream)
    input: PathBuf,

    /// Output WAV path; omit to stream to stdout
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Top-level failure classes, each with its own exit code
///
/// Usage errors are reported by clap before `run` is reached.
#[derive(Error, Debug)]
enum CliError {
    #[error("cannot open source: {0}")]
    SourceOpen(#[source] wavpipe_lib::Error),

    #[error("cannot decode source: {0}")]
    DecodeOpen(#[source] wavpipe_lib::Error),

    #[error("cannot create destination: {0}")]
    DestinationOpen(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] wavpipe_lib::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::SourceOpen(_) => 3,
            CliError::DecodeOpen(_) => 4,
            CliError::DestinationOpen(_) => 5,
            CliError::Write(_) => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config {
        verbose: cli.verbose,
        debug: cli.debug,
    };

    if let Err(e) = wavpipe_lib::init(config) {
        eprintln!("wavpipe: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(total) => {
            info!(total_bytes = total, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("wavpipe: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<u64, CliError> {
    let mut source = SymphoniaSource::new();
    source.open(&cli.input).map_err(|e| match e {
        wavpipe_lib::Error::Io(_) => CliError::SourceOpen(e),
        _ => CliError::DecodeOpen(e),
    })?;

    info!(input = %cli.input.display(), "source opened");

    match &cli.output {
        Some(path) => {
            // Destination failures are reported before any header byte
            // is written.
            let file = File::create(path).map_err(CliError::DestinationOpen)?;
            let sink = WavSink::seekable(BufWriter::new(file));
            let total = WavWriter::new(sink).emit(&mut source).map_err(CliError::Write)?;

            info!(output = %path.display(), total_bytes = total, "file finalized");
            Ok(total)
        }
        None => {
            // Rust streams are byte streams; there is no text-mode
            // translation to disable on any platform.
            let stdout = io::stdout();
            let sink = WavSink::streamed(stdout.lock());
            WavWriter::new(sink).emit(&mut source).map_err(CliError::Write)
        }
    }
}
