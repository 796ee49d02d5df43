//! Canonical 44-byte WAV header

use super::{DATA_CHUNK, FMT_CHUNK, FMT_CHUNK_LEN, FORMAT_PCM, HEADER_LEN, RIFF_MAGIC, WAVE_MAGIC};
use crate::error::{Error, Result};

/// Fixed-layout header for a 16-bit linear PCM WAV file
///
/// The header is always exactly 44 bytes: a RIFF chunk wrapping a 16-byte
/// fmt chunk and a data chunk, little-endian, no padding. The two size
/// fields (`riff_size`, `data_size`) are only meaningful once the payload
/// length is known; a freshly built header carries placeholder zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF chunk size: total file length minus 8
    pub riff_size: u32,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per interleaved sample frame
    pub block_align: u16,
    /// Bits per sample, always 16
    pub bits_per_sample: u16,
    /// data chunk size: total file length minus 44
    pub data_size: u32,
}

impl WavHeader {
    /// Build a header for 16-bit PCM with placeholder size fields
    ///
    /// Derives `block_align = 2 * channels` and
    /// `byte_rate = block_align * sample_rate`. Pure; does no validation,
    /// see [`WavHeader::validate`].
    pub fn for_pcm16(channels: u16, sample_rate: u32) -> Self {
        let block_align = 2 * channels;
        WavHeader {
            riff_size: 0,
            channels,
            sample_rate,
            byte_rate: block_align as u32 * sample_rate,
            block_align,
            bits_per_sample: 16,
            data_size: 0,
        }
    }

    /// Return a copy with size fields derived from the total file length
    ///
    /// `total_bytes` counts everything written, header included.
    pub fn with_sizes(&self, total_bytes: u64) -> Self {
        let mut header = *self;
        header.riff_size = (total_bytes - 8) as u32;
        header.data_size = (total_bytes - HEADER_LEN as u64) as u32;
        header
    }

    /// Serialize to the exact 44-byte wire layout
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];

        bytes[0..4].copy_from_slice(RIFF_MAGIC);
        bytes[4..8].copy_from_slice(&self.riff_size.to_le_bytes());
        bytes[8..12].copy_from_slice(WAVE_MAGIC);

        bytes[12..16].copy_from_slice(FMT_CHUNK);
        bytes[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        bytes[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
        bytes[22..24].copy_from_slice(&self.channels.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        bytes[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        bytes[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        bytes[36..40].copy_from_slice(DATA_CHUNK);
        bytes[40..44].copy_from_slice(&self.data_size.to_le_bytes());

        bytes
    }

    /// Parse a canonical 44-byte PCM header back from bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::format(format!(
                "WAV header too small: {} bytes",
                data.len()
            )));
        }

        if &data[0..4] != RIFF_MAGIC {
            return Err(Error::format("Not a valid RIFF file"));
        }
        if &data[8..12] != WAVE_MAGIC {
            return Err(Error::format("Not a valid WAVE file"));
        }
        if &data[12..16] != FMT_CHUNK {
            return Err(Error::format("fmt chunk not found"));
        }
        if &data[36..40] != DATA_CHUNK {
            return Err(Error::format("data chunk not found"));
        }

        let fmt_size = u32::from_le_bytes([data[16], data[17], data[18], data[19]]);
        if fmt_size != FMT_CHUNK_LEN {
            return Err(Error::unsupported(format!(
                "Extended fmt chunk (size {})",
                fmt_size
            )));
        }

        let format_tag = u16::from_le_bytes([data[20], data[21]]);
        if format_tag != FORMAT_PCM {
            return Err(Error::unsupported(format!(
                "Non-PCM format tag: {:#06x}",
                format_tag
            )));
        }

        Ok(WavHeader {
            riff_size: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            channels: u16::from_le_bytes([data[22], data[23]]),
            sample_rate: u32::from_le_bytes([data[24], data[25], data[26], data[27]]),
            byte_rate: u32::from_le_bytes([data[28], data[29], data[30], data[31]]),
            block_align: u16::from_le_bytes([data[32], data[33]]),
            bits_per_sample: u16::from_le_bytes([data[34], data[35]]),
            data_size: u32::from_le_bytes([data[40], data[41], data[42], data[43]]),
        })
    }

    /// Validate format parameters
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::format("Invalid channel count: 0"));
        }

        if self.sample_rate == 0 {
            return Err(Error::format("Invalid sample rate: 0"));
        }

        if self.bits_per_sample != 16 {
            return Err(Error::unsupported(format!(
                "Bits per sample must be 16, got {}",
                self.bits_per_sample
            )));
        }

        let expected_block_align = self.channels * 2;
        if self.block_align != expected_block_align {
            return Err(Error::format(format!(
                "Block align mismatch: expected {}, got {}",
                expected_block_align, self.block_align
            )));
        }

        let expected_byte_rate = self.block_align as u32 * self.sample_rate;
        if self.byte_rate != expected_byte_rate {
            return Err(Error::format(format!(
                "Byte rate mismatch: expected {}, got {}",
                expected_byte_rate, self.byte_rate
            )));
        }

        Ok(())
    }
}
