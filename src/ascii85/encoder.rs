// Streaming Ascii85 encoder.
//
// Ascii85Encoder provides a streaming API:
//   - Raw bytes are fed in chunks via write_bytes()
//   - Each completed 4-byte big-endian word becomes its 5-character
//     tuple (or the single character `z` for a zero word) immediately
//   - finish() pads the trailing 1-3 byte partial word with zeros,
//     converts it, and truncates the tuple to `bytes + 1` characters
//   - Output is staged in a fixed-size buffer and line-wrapped on the
//     way to the sink

use std::io::Write;

use super::buffer::ChunkWriter;
use super::wrap::{LineEmitter, LineWrap};
use super::{ALPHABET_START, START_DELIMITER, TEXT_CHUNK, TUPLE_CHARS, WORD_BYTES, ZERO_TUPLE};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for encoding. Every byte sequence is encodable; only the
/// sink can fail.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// I/O error writing to the sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Word conversion
// ---------------------------------------------------------------------------

/// Convert one 32-bit word into its five base-85 digits, most significant
/// first, mapped into the printable range by the alphabet offset.
///
/// Fills `buf` from the end via repeated divmod-85, the same shape as a
/// big-endian integer emitter.
#[inline]
fn encode_word(mut word: u32, buf: &mut [u8; TUPLE_CHARS]) {
    let mut i = TUPLE_CHARS;
    loop {
        i -= 1;
        buf[i] = (word % 85) as u8 + ALPHABET_START;
        word /= 85;
        if i == 0 {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Ascii85Encoder
// ---------------------------------------------------------------------------

/// Streaming Ascii85 encoder.
///
/// The opening delimiter is written lazily on the first input byte, so an
/// empty input produces empty output rather than a bare `<~~>` pair.
///
/// # Example
/// ```
/// use oxi85::ascii85::encoder::Ascii85Encoder;
/// use oxi85::ascii85::wrap::LineWrap;
///
/// let mut enc = Ascii85Encoder::new(Vec::new(), LineWrap::Off);
/// enc.write_bytes(b"Ruby").unwrap();
/// let (text, _) = enc.finish().unwrap();
/// assert_eq!(text, b"<~;KZGo~>");
/// ```
pub struct Ascii85Encoder<W: Write> {
    sink: ChunkWriter<W>,
    lines: LineEmitter,
    /// Bytes of the current partial word, big-endian order.
    word: [u8; WORD_BYTES],
    word_len: usize,
    started: bool,
    bytes_in: u64,
}

impl<W: Write> Ascii85Encoder<W> {
    /// Create an encoder writing delimited Ascii85 text to `sink`.
    pub fn new(sink: W, wrap: LineWrap) -> Self {
        Self {
            sink: ChunkWriter::with_capacity(TEXT_CHUNK, sink),
            lines: LineEmitter::new(wrap),
            word: [0; WORD_BYTES],
            word_len: 0,
            started: false,
            bytes_in: 0,
        }
    }

    /// Feed raw bytes to the encoder.
    ///
    /// Input granularity is arbitrary; words spanning call boundaries are
    /// carried in the accumulator.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        if data.is_empty() {
            return Ok(());
        }
        if !self.started {
            self.lines.emit(&mut self.sink, START_DELIMITER)?;
            self.started = true;
        }
        self.bytes_in += data.len() as u64;
        let mut rest = data;

        // Complete a partially accumulated word first.
        if self.word_len > 0 {
            let take = (WORD_BYTES - self.word_len).min(rest.len());
            self.word[self.word_len..self.word_len + take].copy_from_slice(&rest[..take]);
            self.word_len += take;
            rest = &rest[take..];
            if self.word_len < WORD_BYTES {
                // Input exhausted before the word filled.
                return Ok(());
            }
            let word = u32::from_be_bytes(self.word);
            self.emit_word(word)?;
            self.word_len = 0;
        }

        // Full words straight from the caller's input.
        let mut words = rest.chunks_exact(WORD_BYTES);
        for chunk in &mut words {
            let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            self.emit_word(word)?;
        }

        // Accumulate the trailing partial word.
        let rem = words.remainder();
        self.word[..rem.len()].copy_from_slice(rem);
        self.word_len = rem.len();

        Ok(())
    }

    /// Convert one full word: `z` shorthand for zero, else five digits.
    fn emit_word(&mut self, word: u32) -> Result<(), EncodeError> {
        if word == 0 {
            self.lines.emit(&mut self.sink, &[ZERO_TUPLE])?;
        } else {
            let mut tuple = [0u8; TUPLE_CHARS];
            encode_word(word, &mut tuple);
            self.lines.emit(&mut self.sink, &tuple)?;
        }
        Ok(())
    }

    /// Raw bytes received so far.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Finalize the stream: convert the trailing partial word (if any),
    /// append the closing delimiter, and return the sink together with the
    /// number of encoded bytes written to it.
    ///
    /// A zero-valued final word that only became full through padding is
    /// written as a truncated `!!!!!` tuple; collapsing it to `z` would
    /// desynchronize the decoder's padding arithmetic.
    pub fn finish(mut self) -> Result<(W, u64), EncodeError> {
        if self.started {
            if self.word_len > 0 {
                let padding = WORD_BYTES - self.word_len;
                let mut padded = [0u8; WORD_BYTES];
                padded[..self.word_len].copy_from_slice(&self.word[..self.word_len]);
                let mut tuple = [0u8; TUPLE_CHARS];
                encode_word(u32::from_be_bytes(padded), &mut tuple);
                self.lines.emit(&mut self.sink, &tuple[..TUPLE_CHARS - padding])?;
            }
            self.lines.finish(&mut self.sink)?;
        }
        let total = self.sink.bytes_out();
        let sink = self.sink.into_inner()?;
        Ok((sink, total))
    }
}

// ---------------------------------------------------------------------------
// Convenience
// ---------------------------------------------------------------------------

/// Encode `data` in one call, writing the delimited text to `sink`.
/// Returns the number of encoded bytes written.
pub fn encode_all<W: Write>(sink: &mut W, data: &[u8], wrap: LineWrap) -> Result<u64, EncodeError> {
    let mut enc = Ascii85Encoder::new(sink, wrap);
    enc.write_bytes(data)?;
    let (_, total) = enc.finish()?;
    Ok(total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
