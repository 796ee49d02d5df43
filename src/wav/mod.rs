//! RIFF/WAVE container writing
//!
//! This module synthesizes the fixed 44-byte canonical WAV header and
//! streams 16-bit PCM samples behind it, to either a seekable file
//! (size fields backpatched once the payload length is known) or a
//! non-seekable pipe (placeholder size fields).

pub mod header;
pub mod writer;

pub use header::WavHeader;
pub use writer::{WavSink, WavWriter, PULL_FRAMES, TRANSFER_BUF_SAMPLES};

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Canonical PCM WAV header length in bytes
pub const HEADER_LEN: usize = 44;

/// fmt chunk payload size for plain PCM
pub const FMT_CHUNK_LEN: u32 = 16;

/// Format tag for linear PCM
pub const FORMAT_PCM: u16 = 0x0001;
