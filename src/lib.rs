//! Oxi85: streaming Ascii85 (Adobe variant) encoding and decoding.
//!
//! The crate provides:
//! - The core transform (`ascii85`): streaming encoder and decoder, line
//!   wrapping, region extraction, fixed-size buffering
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use oxi85::ascii85::{LineWrap, decoder, encoder};
//!
//! let mut text = Vec::new();
//! encoder::encode_all(&mut text, b"Ruby", LineWrap::Off).unwrap();
//! assert_eq!(text, b"<~;KZGo~>");
//!
//! let bytes = decoder::decode_all(&text).unwrap();
//! assert_eq!(bytes, b"Ruby");
//! ```

pub mod ascii85;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;
