//! wavpipe - compressed audio to WAV conversion
//!
//! wavpipe decodes a compressed audio bitstream (MP3 and anything else the
//! enabled Symphonia codecs handle) and writes the samples out as a
//! canonical 16-bit PCM RIFF/WAVE container.
//!
//! # Architecture
//!
//! - `decode`: the `AudioSource` pull interface and its Symphonia-backed
//!   implementation
//! - `wav`: WAV header synthesis and the streaming container writer
//! - `error`: common error types
//!
//! The container writer is the reusable core: it takes any `AudioSource`
//! and any byte sink, streams interleaved samples through a fixed transfer
//! buffer, and backpatches the header size fields when the sink supports
//! seeking. Writing to a pipe leaves placeholder size fields in the header,
//! which is an inherent limitation of the RIFF layout, not a defect;
//! consumers of piped output must infer the true length from stream
//! termination.

pub mod decode;
pub mod error;
pub mod wav;

pub use error::{Error, Result};

/// wavpipe version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the wavpipe library
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
        }
    }
}

/// Initialize the wavpipe library with the given configuration
///
/// Sets up the tracing subscriber when logging is requested. Log output
/// goes to stderr so it never interleaves with WAV bytes on stdout.
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(level)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION_MAJOR, 0);
        assert_eq!(VERSION_MINOR, 1);
        assert_eq!(VERSION_PATCH, 0);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verbose, false);
        assert_eq!(config.debug, false);
    }
}
