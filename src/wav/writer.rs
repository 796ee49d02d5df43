//! Streaming WAV container writer

use super::header::WavHeader;
use crate::decode::AudioSource;
use crate::error::{Error, Result};
use std::io::{Seek, SeekFrom, Write};
use tracing::{debug, trace};

/// Sample frames requested from the source per read call
pub const PULL_FRAMES: usize = 2048;

/// Capacity of the reusable transfer buffer, in i16 samples
///
/// Covers a full pull at up to 8 channels; memory stays bounded by this
/// buffer no matter how long the source runs.
pub const TRANSFER_BUF_SAMPLES: usize = 16384;

/// Destination sink for WAV output
///
/// Seekability is a property of the variant, not a runtime flag: only a
/// `Seekable` sink can have its header size fields backpatched after the
/// payload is written. A `Streamed` sink (a pipe, typically stdout) keeps
/// the placeholder header it was sent first.
pub enum WavSink<'a> {
    /// Random-access destination, header rewritten after the payload
    Seekable(Box<dyn WriteSeek + 'a>),
    /// Forward-only destination, placeholder header
    Streamed(Box<dyn Write + 'a>),
}

/// Write + Seek combination for seekable sinks
pub trait WriteSeek: Write + Seek {}
impl<T: Write + Seek> WriteSeek for T {}

impl<'a> WavSink<'a> {
    /// Wrap a random-access destination such as a file
    pub fn seekable(writer: impl Write + Seek + 'a) -> Self {
        WavSink::Seekable(Box::new(writer))
    }

    /// Wrap a forward-only destination such as a pipe
    pub fn streamed(writer: impl Write + 'a) -> Self {
        WavSink::Streamed(Box::new(writer))
    }

    /// Whether the header can be rewritten after the payload
    pub fn is_seekable(&self) -> bool {
        matches!(self, WavSink::Seekable(_))
    }

    /// Write a buffer, returning the number of bytes the sink accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            WavSink::Seekable(w) => w.write_all(buf)?,
            WavSink::Streamed(w) => w.write_all(buf)?,
        }
        Ok(buf.len())
    }

    /// Seek back to the start of the output; only valid on seekable sinks
    fn rewind(&mut self) -> Result<()> {
        match self {
            WavSink::Seekable(w) => {
                w.seek(SeekFrom::Start(0))?;
                Ok(())
            }
            WavSink::Streamed(_) => Err(Error::invalid_state("Cannot seek a streamed sink")),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            WavSink::Seekable(w) => w.flush()?,
            WavSink::Streamed(w) => w.flush()?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Uninitialized,
    HeaderWritten,
    Finalized,
    Streamed,
}

/// Streaming WAV writer
///
/// Drives one conversion: writes a provisional 44-byte header, pumps
/// interleaved 16-bit samples from an [`AudioSource`] through a fixed
/// transfer buffer, and for seekable sinks rewrites the header with the
/// final size fields. The source's read returning zero frames is the sole
/// termination signal; clean end-of-stream and a mid-stream decode fault
/// are deliberately not distinguished here.
pub struct WavWriter<'a> {
    sink: WavSink<'a>,
    state: WriterState,
    sample_buf: Vec<i16>,
    byte_buf: Vec<u8>,
    bytes_written: u64,
}

impl<'a> WavWriter<'a> {
    /// Create a writer over the given sink
    pub fn new(sink: WavSink<'a>) -> Self {
        WavWriter {
            sink,
            state: WriterState::Uninitialized,
            sample_buf: vec![0i16; TRANSFER_BUF_SAMPLES],
            byte_buf: Vec::with_capacity(TRANSFER_BUF_SAMPLES * 2),
            bytes_written: 0,
        }
    }

    /// Total bytes accepted by the sink so far, header included
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Convert the whole source into the sink
    ///
    /// Returns the total number of bytes written, header included. May be
    /// called once per writer; a second call is an invalid-state error.
    pub fn emit(&mut self, source: &mut dyn AudioSource) -> Result<u64> {
        if self.state != WriterState::Uninitialized {
            return Err(Error::invalid_state("Header already written"));
        }

        let channels = source.channels()?;
        let sample_rate = source.sample_rate()?;

        let header = WavHeader::for_pcm16(channels, sample_rate);
        header.validate()?;

        debug!(
            channels,
            sample_rate,
            seekable = self.sink.is_seekable(),
            "writing WAV header"
        );

        // Provisional header first; size fields are placeholder zeros
        // until the payload length is known.
        self.bytes_written += self.sink.write(&header.to_bytes())? as u64;
        self.state = WriterState::HeaderWritten;

        let max_frames = PULL_FRAMES.min(self.sample_buf.len() / channels as usize);

        loop {
            let frames = source.read(&mut self.sample_buf, max_frames)?;
            if frames == 0 {
                break;
            }

            let samples = frames * channels as usize;
            self.byte_buf.clear();
            for &sample in &self.sample_buf[..samples] {
                self.byte_buf.extend_from_slice(&sample.to_le_bytes());
            }

            self.bytes_written += self.sink.write(&self.byte_buf)? as u64;
            trace!(frames, total = self.bytes_written, "wrote sample block");
        }

        if self.sink.is_seekable() {
            // The only seek in the pipeline: rewind and rewrite the full
            // header with the corrected size fields.
            let finalized = header.with_sizes(self.bytes_written);
            self.sink.rewind()?;
            self.sink.write(&finalized.to_bytes())?;
            self.sink.flush()?;
            self.state = WriterState::Finalized;

            debug!(
                riff_size = finalized.riff_size,
                data_size = finalized.data_size,
                "backpatched header"
            );
        } else {
            self.sink.flush()?;
            self.state = WriterState::Streamed;
        }

        debug!(total_bytes = self.bytes_written, "conversion finished");
        Ok(self.bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct SilenceSource {
        channels: u16,
        sample_rate: u32,
        frames_left: usize,
    }

    impl AudioSource for SilenceSource {
        fn open(&mut self, _path: &std::path::Path) -> Result<()> {
            Ok(())
        }

        fn channels(&self) -> Result<u16> {
            Ok(self.channels)
        }

        fn sample_rate(&self) -> Result<u32> {
            Ok(self.sample_rate)
        }

        fn read(&mut self, buf: &mut [i16], max_frames: usize) -> Result<usize> {
            let frames = self.frames_left.min(max_frames);
            buf[..frames * self.channels as usize].fill(0);
            self.frames_left -= frames;
            Ok(frames)
        }
    }

    #[test]
    fn test_streamed_sink_is_not_seekable() {
        let mut out = Vec::new();
        let mut sink = WavSink::streamed(&mut out);
        assert!(!sink.is_seekable());
        assert!(matches!(sink.rewind(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_seekable_sink_rewind() {
        let mut sink = WavSink::seekable(Cursor::new(Vec::new()));
        assert!(sink.is_seekable());
        sink.write(b"abcd").unwrap();
        assert!(sink.rewind().is_ok());
    }

    #[test]
    fn test_emit_twice_is_invalid_state() {
        let mut source = SilenceSource {
            channels: 1,
            sample_rate: 8000,
            frames_left: 16,
        };

        let mut writer = WavWriter::new(WavSink::seekable(Cursor::new(Vec::new())));
        writer.emit(&mut source).unwrap();

        let result = writer.emit(&mut source);
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_emit_rejects_zero_channels() {
        let mut source = SilenceSource {
            channels: 0,
            sample_rate: 8000,
            frames_left: 0,
        };

        let mut writer = WavWriter::new(WavSink::seekable(Cursor::new(Vec::new())));
        assert!(writer.emit(&mut source).is_err());
    }
}
