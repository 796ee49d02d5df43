//! CLI integration tests for wavpipe
//!
//! Runs the wavpipe binary against generated WAV input and verifies the
//! produced container plus the exit-code contract.

use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};
use wavpipe_lib::wav::{WavHeader, HEADER_LEN};

// ============================================================================
// Helper Functions
// ============================================================================

/// Run wavpipe and return its output
fn run_wavpipe(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Create a small valid 16-bit PCM WAV file and return it with its payload
///
/// Symphonia decodes WAV/PCM out of the box, so a generated WAV makes a
/// deterministic end-to-end input: the decoded samples must round-trip
/// bit-exactly into the output container.
fn create_test_wav(channels: u16, sample_rate: u32, frames: usize) -> (NamedTempFile, Vec<u8>) {
    let mut file = NamedTempFile::with_suffix(".wav").expect("Failed to create temp file");

    let mut payload = Vec::with_capacity(frames * channels as usize * 2);
    let mut value: i16 = -300;
    for _ in 0..frames * channels as usize {
        payload.extend_from_slice(&value.to_le_bytes());
        value = value.wrapping_add(7);
    }

    let total = HEADER_LEN + payload.len();
    let header = WavHeader::for_pcm16(channels, sample_rate).with_sizes(total as u64);

    file.write_all(&header.to_bytes()).unwrap();
    file.write_all(&payload).unwrap();
    file.flush().unwrap();

    (file, payload)
}

// ============================================================================
// File (two-argument) mode
// ============================================================================

#[test]
fn test_file_mode_produces_finalized_wav() {
    let (input, payload) = create_test_wav(1, 8000, 500);
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("out.wav");

    let output = run_wavpipe(&[
        input.path().to_str().unwrap(),
        out_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let bytes = fs::read(&out_path).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN + payload.len());

    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.channels, 1);
    assert_eq!(header.sample_rate, 8000);
    assert_eq!(header.riff_size as usize + 8, bytes.len());
    assert_eq!(header.data_size as usize + HEADER_LEN, bytes.len());

    // PCM in, PCM out: the payload must survive bit-exactly
    assert_eq!(&bytes[HEADER_LEN..], &payload[..]);
}

#[test]
fn test_file_mode_stereo() {
    let (input, payload) = create_test_wav(2, 44100, 300);
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("stereo.wav");

    let output = run_wavpipe(&[
        input.path().to_str().unwrap(),
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let bytes = fs::read(&out_path).unwrap();
    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.channels, 2);
    assert_eq!(header.block_align, 4);
    assert_eq!(header.byte_rate, 176400);
    assert_eq!(&bytes[HEADER_LEN..], &payload[..]);
}

// ============================================================================
// Pipe (one-argument) mode
// ============================================================================

#[test]
fn test_pipe_mode_streams_placeholder_header() {
    let (input, payload) = create_test_wav(2, 44100, 200);

    let output = run_wavpipe(&[input.path().to_str().unwrap()]);
    assert!(output.status.success());

    let bytes = &output.stdout;
    assert_eq!(bytes.len(), HEADER_LEN + payload.len());

    let header = WavHeader::parse(bytes).unwrap();
    assert_eq!(header.channels, 2);
    assert_eq!(header.sample_rate, 44100);
    // No rewind on a pipe: size fields stay at their placeholder value
    assert_eq!(header.riff_size, 0);
    assert_eq!(header.data_size, 0);

    assert_eq!(&bytes[HEADER_LEN..], &payload[..]);
}

// ============================================================================
// Failure modes and exit codes
// ============================================================================

#[test]
fn test_no_arguments_is_usage_error() {
    let output = run_wavpipe(&[]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_source_exit_code() {
    let output = run_wavpipe(&["/nonexistent/input.mp3"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_corrupt_source_exit_code_and_untouched_destination() {
    let mut garbage = NamedTempFile::with_suffix(".mp3").unwrap();
    garbage
        .write_all(b"this is definitely not an audio bitstream, not even close")
        .unwrap();
    garbage.flush().unwrap();

    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("never.wav");

    let output = run_wavpipe(&[
        garbage.path().to_str().unwrap(),
        out_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(4));

    // Decode-open failure happens before the destination is created
    assert!(!out_path.exists());
}

#[test]
fn test_unwritable_destination_exit_code() {
    let (input, _) = create_test_wav(1, 8000, 10);

    let output = run_wavpipe(&[
        input.path().to_str().unwrap(),
        "/nonexistent-dir/out.wav",
    ]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(5));
}
