// Streaming Ascii85 decoder.
//
// Character-by-character state machine: whitespace is skipped anywhere,
// `z` expands to a zero word at tuple start only, alphabet characters
// accumulate base-85 digits positionally, and the trailing partial tuple
// is recovered by max-digit padding. Extract mode locates the first
// `<~ ... ~>` region and discards everything outside it.
//
// Extract mode holds the payload text until the closing marker is seen:
// a region whose closing marker never arrives must yield empty output,
// with no validation errors, so nothing may reach the sink or the tuple
// machine before the region is known to be complete.

use std::io::Write;

use super::buffer::ChunkWriter;
use super::{
    ALPHABET_END, ALPHABET_START, END_DELIMITER, POW85, RAW_CHUNK, START_DELIMITER, TUPLE_CHARS,
    WORD_BYTES, ZERO_TUPLE, is_ignored_whitespace,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for decoding.
///
/// Every malformation is a `Format` error; the payload names the violated
/// rule. The first violation aborts the call. There is no skip-and-continue
/// mode, and bytes already written to the sink carry no meaning after a
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// I/O error against the source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input violates the Ascii85 format.
    #[error("invalid Ascii85: {0}")]
    Format(String),
}

// ---------------------------------------------------------------------------
// Region extraction
// ---------------------------------------------------------------------------

/// Locate the first `<~ ... ~>` delimited span in `text`.
///
/// Returns the payload between the markers, excluding them. The closing
/// marker is searched for after the opening one; if either is missing the
/// result is the empty slice (not an error). Later delimited spans are
/// never considered.
pub fn extract(text: &[u8]) -> &[u8] {
    let Some(start) = find(text, START_DELIMITER) else {
        return &[];
    };
    let payload = &text[start + START_DELIMITER.len()..];
    let Some(end) = find(payload, END_DELIMITER) else {
        return &[];
    };
    &payload[..end]
}

fn find(haystack: &[u8], needle: &[u8; 2]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ---------------------------------------------------------------------------
// Delimiter scanning state
// ---------------------------------------------------------------------------

/// Delimiter handling, selected at construction.
enum Region {
    /// Payload is delimiter-free; every character feeds the tuple machine.
    Raw,
    /// Still looking for `<~`. `half_open` tracks a `<` seen last, so the
    /// marker is found even when split across chunk boundaries.
    Seeking { half_open: bool },
    /// Between the markers, accumulating payload text. `half_close` tracks
    /// a held-back `~` that may begin the closing marker.
    Inside { payload: Vec<u8>, half_close: bool },
    /// Closing marker seen and payload decoded; the rest of the input is
    /// discarded.
    Done,
}

// ---------------------------------------------------------------------------
// Ascii85Decoder
// ---------------------------------------------------------------------------

/// Streaming Ascii85 decoder.
///
/// # Example
/// ```
/// use oxi85::ascii85::decoder::Ascii85Decoder;
///
/// let mut dec = Ascii85Decoder::new_delimited(Vec::new());
/// dec.push(b"ignored <~;KZGo~> also ignored").unwrap();
/// let (bytes, _) = dec.finish().unwrap();
/// assert_eq!(bytes, b"Ruby");
/// ```
pub struct Ascii85Decoder<W: Write> {
    sink: ChunkWriter<W>,
    region: Region,
    /// Accumulated word value; wider than 32 bits so overflow is detected
    /// rather than wrapped.
    word: u64,
    /// Characters consumed toward the current tuple.
    count: usize,
}

impl<W: Write> Ascii85Decoder<W> {
    /// Decoder for input containing a `<~ ... ~>` delimited region.
    pub fn new_delimited(sink: W) -> Self {
        Self::with_region(sink, Region::Seeking { half_open: false })
    }

    /// Decoder for raw, delimiter-free Ascii85 text.
    pub fn new_raw(sink: W) -> Self {
        Self::with_region(sink, Region::Raw)
    }

    fn with_region(sink: W, region: Region) -> Self {
        Self {
            sink: ChunkWriter::with_capacity(RAW_CHUNK, sink),
            region,
            word: 0,
            count: 0,
        }
    }

    /// Feed input text to the decoder. Granularity is arbitrary; markers
    /// and tuples may span call boundaries.
    pub fn push(&mut self, text: &[u8]) -> Result<(), DecodeError> {
        for &byte in text {
            self.step(byte)?;
        }
        Ok(())
    }

    fn step(&mut self, byte: u8) -> Result<(), DecodeError> {
        match std::mem::replace(&mut self.region, Region::Done) {
            Region::Raw => {
                self.region = Region::Raw;
                self.consume(byte)
            }
            Region::Done => Ok(()),
            Region::Seeking { half_open } => {
                self.region = if half_open && byte == START_DELIMITER[1] {
                    Region::Inside {
                        payload: Vec::new(),
                        half_close: false,
                    }
                } else {
                    Region::Seeking {
                        half_open: byte == START_DELIMITER[0],
                    }
                };
                Ok(())
            }
            Region::Inside {
                mut payload,
                half_close,
            } => {
                if half_close {
                    if byte == END_DELIMITER[1] {
                        // Region complete: run the held payload through the
                        // tuple machine in one pass.
                        for &b in &payload {
                            self.consume(b)?;
                        }
                        return self.finalize_partial();
                    }
                    // The held-back '~' was payload after all.
                    payload.push(END_DELIMITER[0]);
                }
                let half_close = byte == END_DELIMITER[0];
                if !half_close {
                    payload.push(byte);
                }
                self.region = Region::Inside {
                    payload,
                    half_close,
                };
                Ok(())
            }
        }
    }

    /// Advance the tuple state machine by one payload character.
    fn consume(&mut self, byte: u8) -> Result<(), DecodeError> {
        if is_ignored_whitespace(byte) {
            return Ok(());
        }
        if byte == ZERO_TUPLE {
            if self.count != 0 {
                return Err(DecodeError::Format("'z' inside a 5-tuple".into()));
            }
            self.sink.write_all(&[0u8; WORD_BYTES])?;
            return Ok(());
        }
        if !(ALPHABET_START..=ALPHABET_END).contains(&byte) {
            return Err(DecodeError::Format(format!(
                "illegal character {:?} (0x{byte:02x})",
                char::from(byte)
            )));
        }
        self.word += u64::from(byte - ALPHABET_START) * POW85[self.count];
        self.count += 1;
        if self.count == TUPLE_CHARS {
            if self.word > u64::from(u32::MAX) {
                return Err(DecodeError::Format(format!(
                    "5-tuple value {:#011x} exceeds 32 bits",
                    self.word
                )));
            }
            self.sink.write_all(&(self.word as u32).to_be_bytes())?;
            self.word = 0;
            self.count = 0;
        }
        Ok(())
    }

    /// Recover the bytes of a trailing partial tuple.
    ///
    /// The tuple is completed as if padded with the maximum digit in every
    /// missing position (the single additive term `85^(4-(count-1))`), and
    /// the leading `count - 1` bytes of the word are the original data.
    /// A one-character tuple cannot encode anything and is rejected.
    fn finalize_partial(&mut self) -> Result<(), DecodeError> {
        match self.count {
            0 => return Ok(()),
            1 => {
                return Err(DecodeError::Format(
                    "final tuple consists of a single character".into(),
                ));
            }
            _ => {}
        }
        let keep = self.count - 1;
        self.word += POW85[keep];
        if self.word > u64::from(u32::MAX) {
            return Err(DecodeError::Format(format!(
                "final tuple value {:#011x} exceeds 32 bits",
                self.word
            )));
        }
        let bytes = (self.word as u32).to_be_bytes();
        self.sink.write_all(&bytes[..keep])?;
        self.word = 0;
        self.count = 0;
        Ok(())
    }

    /// Decoded bytes produced so far.
    pub fn bytes_out(&self) -> u64 {
        self.sink.bytes_out()
    }

    /// Finalize the stream and return the sink together with the number of
    /// decoded bytes written to it.
    ///
    /// Raw mode recovers the trailing partial tuple here. Extract mode
    /// with no complete delimited region yields empty output; that is not
    /// an error.
    pub fn finish(mut self) -> Result<(W, u64), DecodeError> {
        if matches!(self.region, Region::Raw) {
            self.finalize_partial()?;
        }
        let total = self.sink.bytes_out();
        let sink = self.sink.into_inner()?;
        Ok((sink, total))
    }
}

// ---------------------------------------------------------------------------
// Convenience
// ---------------------------------------------------------------------------

/// Decode input containing a `<~ ... ~>` delimited Ascii85 region.
/// Missing delimiters yield an empty vector, not an error.
pub fn decode_all(text: &[u8]) -> Result<Vec<u8>, DecodeError> {
    decode_raw_all(extract(text))
}

/// Decode raw Ascii85 text carrying no delimiters.
pub fn decode_raw_all(text: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut dec = Ascii85Decoder::new_raw(Vec::with_capacity(
        text.len().div_ceil(TUPLE_CHARS) * WORD_BYTES,
    ));
    dec.push(text)?;
    let (bytes, _) = dec.finish()?;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
