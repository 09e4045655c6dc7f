// Ascii85 (Adobe variant) transform.
//
// Packs 4 raw bytes into 5 characters of the 85-character alphabet
// `!`..`u`, with `z` standing for a full zero word and a `<~ ... ~>`
// delimiter pair bounding the payload in mixed text.
//
// # Modules
//
// - `encoder` — streaming raw-bytes-to-text conversion
// - `decoder` — streaming text-to-raw-bytes conversion and region extraction
// - `wrap`    — fixed-column line breaking for encoder output
// - `buffer`  — fixed-size chunking adapters between transform and I/O

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod wrap;

// Re-export key types for convenience.
pub use buffer::{ChunkReader, ChunkWriter};
pub use decoder::{Ascii85Decoder, DecodeError, decode_all, decode_raw_all, extract};
pub use encoder::{Ascii85Encoder, EncodeError, encode_all};
pub use wrap::LineWrap;

/// Opening delimiter of an Ascii85 region in mixed text.
pub const START_DELIMITER: &[u8; 2] = b"<~";

/// Closing delimiter of an Ascii85 region.
pub const END_DELIMITER: &[u8; 2] = b"~>";

/// First character of the 85-character alphabet (`!`, digit value 0).
pub(crate) const ALPHABET_START: u8 = b'!';

/// Last character of the 85-character alphabet (`u`, digit value 84).
pub(crate) const ALPHABET_END: u8 = b'u';

/// Shorthand for a full four-byte zero word.
pub(crate) const ZERO_TUPLE: u8 = b'z';

/// Raw bytes per word.
pub(crate) const WORD_BYTES: usize = 4;

/// Encoded characters per tuple.
pub(crate) const TUPLE_CHARS: usize = 5;

/// Raw-side chunk capacity. The 4:5 ratio against [`TEXT_CHUNK`] keeps
/// refills aligned with tuple boundaries, though correctness does not
/// depend on alignment.
pub(crate) const RAW_CHUNK: usize = WORD_BYTES * 2048;

/// Encoded-side chunk capacity.
pub(crate) const TEXT_CHUNK: usize = TUPLE_CHARS * 2048;

/// Powers of 85 for positional digit accumulation, most significant first.
/// Wider than `u32`: a single digit contribution can exceed 32 bits before
/// the overflow check runs.
pub(crate) const POW85: [u64; TUPLE_CHARS] = [
    85u64.pow(4),
    85u64.pow(3),
    85u64.pow(2),
    85u64.pow(1),
    1,
];

/// Whitespace the decoder skips wherever it occurs, including inside a
/// tuple: space, TAB, CR, LF, form-feed, NUL.
pub(crate) const fn is_ignored_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}
