// File-level I/O helpers for Ascii85 encoding/decoding.
//
// Provides `encode_file()` and `decode_file()` convenience functions that
// wrap the streaming transforms with proper buffered I/O. Optionally
// computes streaming SHA-256 checksums (feature-gated behind `file-io`).

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::ascii85::buffer::ChunkReader;
use crate::ascii85::decoder::{Ascii85Decoder, DecodeError};
use crate::ascii85::encoder::{Ascii85Encoder, EncodeError};
use crate::ascii85::wrap::LineWrap;
use crate::ascii85::{RAW_CHUNK, TEXT_CHUNK};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `encode_file()`.
#[derive(Debug, Clone)]
pub struct EncodeStats {
    /// Raw input size in bytes.
    pub input_size: u64,
    /// Encoded output size in bytes, delimiters and line breaks included.
    pub output_size: u64,
    /// SHA-256 of the raw input (if the `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `decode_file()`.
#[derive(Debug, Clone)]
pub struct DecodeStats {
    /// Encoded input size in bytes.
    pub input_size: u64,
    /// Decoded output size in bytes.
    pub output_size: u64,
    /// SHA-256 of the decoded output (if the `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Ascii85 encoding error.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    /// Ascii85 decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// encode_file
// ---------------------------------------------------------------------------

/// Encode a raw input file to delimited Ascii85 text at `output_path`.
///
/// The input is streamed through a `BufReader` in raw-side chunks; the
/// output uses `BufWriter`. When the `file-io` feature is enabled, a
/// SHA-256 checksum of the input is computed incrementally as data flows
/// through the pipeline.
pub fn encode_file(
    input_path: &Path,
    output_path: &Path,
    wrap: LineWrap,
) -> Result<EncodeStats, IoError> {
    let input_file = File::open(input_path)?;
    let input_size = input_file.metadata()?.len();
    let mut reader = BufReader::with_capacity(BUF_SIZE, input_file);

    let output_file = File::create(output_path)?;
    let writer = BufWriter::with_capacity(BUF_SIZE, output_file);

    let mut encoder = Ascii85Encoder::new(writer, wrap);

    #[cfg(feature = "file-io")]
    let mut hasher = sha2::Sha256::new();

    let mut chunks = ChunkReader::with_capacity(RAW_CHUNK, &mut reader);
    while let Some(chunk) = chunks.next_chunk()? {
        #[cfg(feature = "file-io")]
        hasher.update(chunk);
        encoder.write_bytes(chunk)?;
    }

    let (writer, output_size) = encoder.finish()?;
    writer.into_inner().map_err(|e| e.into_error())?;

    #[cfg(feature = "file-io")]
    let input_sha256 = Some(hasher.finalize().into());
    #[cfg(not(feature = "file-io"))]
    let input_sha256: Option<[u8; 32]> = None;

    log::debug!(
        "encode_file: {} -> {}: {input_size} bytes in, {output_size} out",
        input_path.display(),
        output_path.display()
    );

    Ok(EncodeStats {
        input_size,
        output_size,
        input_sha256,
    })
}

// ---------------------------------------------------------------------------
// decode_file
// ---------------------------------------------------------------------------

/// Decode an Ascii85 text file back to raw bytes at `output_path`.
///
/// By default the input is searched for a `<~ ... ~>` delimited region;
/// with `raw` set the whole input is treated as payload. When the
/// `file-io` feature is enabled, a SHA-256 checksum of the decoded output
/// is computed incrementally.
pub fn decode_file(
    input_path: &Path,
    output_path: &Path,
    raw: bool,
) -> Result<DecodeStats, IoError> {
    let input_file = File::open(input_path)?;
    let input_size = input_file.metadata()?.len();
    let mut reader = BufReader::with_capacity(BUF_SIZE, input_file);

    let output_file = File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, output_file);

    #[cfg(feature = "file-io")]
    let mut hasher = sha2::Sha256::new();

    #[cfg(feature = "file-io")]
    let output_size = {
        let mut hashing_writer = HashingWriter {
            inner: &mut writer,
            hasher: &mut hasher,
        };
        run_decode(&mut reader, &mut hashing_writer, raw)?
    };

    #[cfg(not(feature = "file-io"))]
    let output_size = run_decode(&mut reader, &mut writer, raw)?;

    writer.into_inner().map_err(|e| e.into_error())?;

    #[cfg(feature = "file-io")]
    let output_sha256 = Some(hasher.finalize().into());
    #[cfg(not(feature = "file-io"))]
    let output_sha256: Option<[u8; 32]> = None;

    log::debug!(
        "decode_file: {} -> {}: {input_size} bytes in, {output_size} out",
        input_path.display(),
        output_path.display()
    );

    Ok(DecodeStats {
        input_size,
        output_size,
        output_sha256,
    })
}

/// Pump the reader through a decoder into `sink` in text-side chunks.
fn run_decode<R: Read, W: Write>(reader: &mut R, sink: W, raw: bool) -> Result<u64, DecodeError> {
    let mut decoder = if raw {
        Ascii85Decoder::new_raw(sink)
    } else {
        Ascii85Decoder::new_delimited(sink)
    };
    let mut chunks = ChunkReader::with_capacity(TEXT_CHUNK, reader);
    while let Some(chunk) = chunks.next_chunk()? {
        decoder.push(chunk)?;
    }
    let (_, total) = decoder.finish()?;
    Ok(total)
}

// ---------------------------------------------------------------------------
// Hashing writer (used with file-io feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
struct HashingWriter<'a, W: Write> {
    inner: &'a mut W,
    hasher: &'a mut sha2::Sha256,
}

#[cfg(feature = "file-io")]
impl<W: Write> Write for HashingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp_file(name: &str, data: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join("oxi85_io_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(data).unwrap();
        path
    }

    fn cleanup_temp_files(paths: &[&Path]) {
        for p in paths {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn encode_decode_file_roundtrip() {
        let data = b"The quick brown fox jumps over the lazy dog. 1234567890";

        let input_path = write_temp_file("input.bin", data);
        let encoded_path = write_temp_file("encoded.a85", b"");
        let output_path = write_temp_file("output.bin", b"");

        let enc_stats = encode_file(&input_path, &encoded_path, LineWrap::default()).unwrap();
        assert_eq!(enc_stats.input_size, data.len() as u64);
        assert!(enc_stats.output_size > 0);

        let dec_stats = decode_file(&encoded_path, &output_path, false).unwrap();
        assert_eq!(dec_stats.input_size, enc_stats.output_size);
        assert_eq!(dec_stats.output_size, data.len() as u64);

        let output_data = std::fs::read(&output_path).unwrap();
        assert_eq!(output_data, data);

        cleanup_temp_files(&[&input_path, &encoded_path, &output_path]);
    }

    #[test]
    fn empty_input_file() {
        let input_path = write_temp_file("empty_input.bin", b"");
        let encoded_path = write_temp_file("empty_encoded.a85", b"x");
        let output_path = write_temp_file("empty_output.bin", b"x");

        let enc_stats = encode_file(&input_path, &encoded_path, LineWrap::Off).unwrap();
        assert_eq!(enc_stats.output_size, 0);
        assert_eq!(std::fs::read(&encoded_path).unwrap(), b"");

        let dec_stats = decode_file(&encoded_path, &output_path, false).unwrap();
        assert_eq!(dec_stats.output_size, 0);
        assert_eq!(std::fs::read(&output_path).unwrap(), b"");

        cleanup_temp_files(&[&input_path, &encoded_path, &output_path]);
    }

    #[test]
    fn raw_mode_decodes_bare_payload() {
        let input_path = write_temp_file("raw_input.a85", b";KZGo");
        let output_path = write_temp_file("raw_output.bin", b"");

        let stats = decode_file(&input_path, &output_path, true).unwrap();
        assert_eq!(stats.output_size, 4);
        assert_eq!(std::fs::read(&output_path).unwrap(), b"Ruby");

        cleanup_temp_files(&[&input_path, &output_path]);
    }

    #[test]
    fn format_error_surfaces_as_decode_variant() {
        let input_path = write_temp_file("bad_input.a85", b"<~;KzGo~>");
        let output_path = write_temp_file("bad_output.bin", b"");

        let err = decode_file(&input_path, &output_path, false).unwrap_err();
        assert!(matches!(err, IoError::Decode(DecodeError::Format(_))));

        cleanup_temp_files(&[&input_path, &output_path]);
    }

    #[cfg(feature = "file-io")]
    #[test]
    fn sha256_checksums_computed() {
        let data = b"checksum test payload";

        let input_path = write_temp_file("sha_input.bin", data);
        let encoded_path = write_temp_file("sha_encoded.a85", b"");
        let output_path = write_temp_file("sha_output.bin", b"");

        let enc_stats = encode_file(&input_path, &encoded_path, LineWrap::Off).unwrap();
        assert!(enc_stats.input_sha256.is_some());

        let dec_stats = decode_file(&encoded_path, &output_path, false).unwrap();
        assert!(dec_stats.output_sha256.is_some());
        // The decoded output is the original input, so the digests match.
        assert_eq!(dec_stats.output_sha256, enc_stats.input_sha256);

        cleanup_temp_files(&[&input_path, &encoded_path, &output_path]);
    }

    #[test]
    fn large_file_multi_chunk() {
        // Several times the chunk size, with a zero run to exercise the
        // z-shorthand path.
        let mut data: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();
        data.extend_from_slice(&[0u8; 10_000]);

        let input_path = write_temp_file("large_input.bin", &data);
        let encoded_path = write_temp_file("large_encoded.a85", b"");
        let output_path = write_temp_file("large_output.bin", b"");

        let enc_stats = encode_file(&input_path, &encoded_path, LineWrap::Columns(72)).unwrap();
        assert!(enc_stats.output_size > enc_stats.input_size);

        let dec_stats = decode_file(&encoded_path, &output_path, false).unwrap();
        assert_eq!(dec_stats.output_size, data.len() as u64);

        let output_data = std::fs::read(&output_path).unwrap();
        assert_eq!(output_data, data);

        cleanup_temp_files(&[&input_path, &encoded_path, &output_path]);
    }
}
