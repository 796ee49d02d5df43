//! Audio source abstraction and decoder implementations
//!
//! The container writer never sees a specific bitstream format; it pulls
//! interleaved 16-bit PCM through the [`AudioSource`] trait. The only
//! shipped implementation decodes through Symphonia.

pub mod symphonia;

pub use self::symphonia::SymphoniaSource;

use crate::error::Result;
use std::path::Path;

/// Pull-based source of interleaved 16-bit PCM
pub trait AudioSource {
    /// Open an encoded source; must be called exactly once, before any
    /// other operation. Fails if the source is not a valid encoded stream.
    fn open(&mut self, path: &Path) -> Result<()>;

    /// Channel count, fixed for the session; errors before a successful open
    fn channels(&self) -> Result<u16>;

    /// Sample rate in Hz, fixed for the session; errors before a successful open
    fn sample_rate(&self) -> Result<u32>;

    /// Pull up to `max_frames` interleaved sample frames into `buf`
    ///
    /// Returns the number of frames produced; `Ok(0)` signals end of
    /// stream and terminates the caller's loop. `buf` must hold at least
    /// `max_frames * channels` samples.
    fn read(&mut self, buf: &mut [i16], max_frames: usize) -> Result<usize>;
}
