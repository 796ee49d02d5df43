//! Symphonia-backed audio source
//!
//! Wraps Symphonia's probe, format reader and decoder behind the
//! [`AudioSource`] pull interface. The probe accepts anything the enabled
//! Symphonia codecs can decode to PCM; MP3 is the primary target.

use super::AudioSource;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

/// Audio source decoding through Symphonia
pub struct SymphoniaSource {
    reader: Option<Box<dyn FormatReader>>,
    decoder: Option<Box<dyn Decoder>>,
    sample_buf: Option<SampleBuffer<i16>>,
    /// Decoded samples not yet handed to the caller
    pending: Vec<i16>,
    track_id: Option<u32>,
    channels: Option<u16>,
    sample_rate: Option<u32>,
}

impl SymphoniaSource {
    /// Create an unopened source
    pub fn new() -> Self {
        SymphoniaSource {
            reader: None,
            decoder: None,
            sample_buf: None,
            pending: Vec::new(),
            track_id: None,
            channels: None,
            sample_rate: None,
        }
    }

    /// Decode packets until samples are pending or the stream ends
    ///
    /// End-of-stream and a mid-stream decode fault both end the session;
    /// the fault is logged but reported to the caller identically, as a
    /// zero-frame read.
    fn refill(&mut self) -> Result<()> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| Error::invalid_state("Source not opened"))?;

        let decoder = self
            .decoder
            .as_mut()
            .ok_or_else(|| Error::invalid_state("Decoder not initialized"))?;

        let track_id = self
            .track_id
            .ok_or_else(|| Error::invalid_state("No track selected"))?;

        while self.pending.is_empty() {
            let packet = match reader.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref io_err))
                    if io_err.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    return Ok(())
                }
                Err(symphonia::core::errors::Error::ResetRequired) => return Ok(()),
                Err(e) => {
                    warn!("stopping on read fault: {}", e);
                    return Ok(());
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(e) => {
                    warn!("stopping on decode fault: {}", e);
                    return Ok(());
                }
            };

            if self.sample_buf.is_none() {
                let spec = *decoded.spec();
                let capacity = decoded.capacity() as u64;
                self.sample_buf = Some(SampleBuffer::<i16>::new(capacity, spec));
            }

            // Converts planar/float/whatever to interleaved i16
            let sample_buf = self.sample_buf.as_mut().unwrap();
            sample_buf.copy_interleaved_ref(decoded);
            self.pending.extend_from_slice(sample_buf.samples());
        }

        Ok(())
    }
}

impl Default for SymphoniaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSource for SymphoniaSource {
    fn open(&mut self, path: &Path) -> Result<()> {
        if self.reader.is_some() {
            return Err(Error::invalid_state("Source already opened"));
        }

        // A missing/unreadable path surfaces as Error::Io, distinct from
        // an unparseable bitstream below.
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::format(format!("Failed to probe source: {}", e)))?;

        let reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::format("No supported audio track found"))?;

        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| Error::codec("Source does not report a sample rate"))?;

        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .ok_or_else(|| Error::codec("Source does not report a channel count"))?;

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| Error::codec(format!("Unsupported codec: {}", e)))?;

        self.track_id = Some(track.id);
        self.channels = Some(channels);
        self.sample_rate = Some(sample_rate);
        self.decoder = Some(decoder);
        self.reader = Some(reader);

        Ok(())
    }

    fn channels(&self) -> Result<u16> {
        self.channels
            .ok_or_else(|| Error::invalid_state("Source not opened"))
    }

    fn sample_rate(&self) -> Result<u32> {
        self.sample_rate
            .ok_or_else(|| Error::invalid_state("Source not opened"))
    }

    fn read(&mut self, buf: &mut [i16], max_frames: usize) -> Result<usize> {
        let channels = self.channels()? as usize;

        if self.pending.is_empty() {
            self.refill()?;
        }

        if self.pending.is_empty() {
            return Ok(0);
        }

        let max_samples = (max_frames * channels).min(buf.len());
        let samples = self.pending.len().min(max_samples);
        // Hand out whole frames only
        let samples = samples - samples % channels;

        buf[..samples].copy_from_slice(&self.pending[..samples]);
        self.pending.drain(..samples);

        Ok(samples / channels)
    }
}
