// Line wrapping for encoder output.
//
// The emitter treats the encoded stream as opaque text: tuples may be
// split across a line boundary. The opening `<~` counts toward the first
// line; the closing `~>` moves to its own line when the current one
// cannot hold both characters.

use std::io::{self, Write};

use super::END_DELIMITER;

/// Minimum usable wrap width: a line must at least hold the two-character
/// closing delimiter.
pub const MIN_WIDTH: usize = 2;

/// Line-wrapping mode, selected at encoder construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWrap {
    /// Single-line output.
    Off,
    /// Break lines at the given column. Widths below [`MIN_WIDTH`] are
    /// clamped, not rejected.
    Columns(usize),
}

impl Default for LineWrap {
    /// The conventional 80-column wrap.
    fn default() -> Self {
        LineWrap::Columns(80)
    }
}

/// Stateful emitter feeding encoded text to a sink, inserting a line
/// break whenever the current line is full.
#[derive(Debug)]
pub(crate) struct LineEmitter {
    width: Option<usize>,
    column: usize,
}

impl LineEmitter {
    pub(crate) fn new(wrap: LineWrap) -> Self {
        let width = match wrap {
            LineWrap::Off => None,
            LineWrap::Columns(w) => Some(w.max(MIN_WIDTH)),
        };
        Self { width, column: 0 }
    }

    /// Write `text` to `sink`, breaking lines as needed. Tuple boundaries
    /// are not visible here.
    pub(crate) fn emit<W: Write>(&mut self, sink: &mut W, text: &[u8]) -> io::Result<()> {
        let Some(width) = self.width else {
            return sink.write_all(text);
        };
        let mut rest = text;
        while !rest.is_empty() {
            if self.column == width {
                sink.write_all(b"\n")?;
                self.column = 0;
            }
            let take = (width - self.column).min(rest.len());
            sink.write_all(&rest[..take])?;
            self.column += take;
            rest = &rest[take..];
        }
        Ok(())
    }

    /// Append the closing delimiter, on a fresh line when the current one
    /// cannot hold both of its characters.
    pub(crate) fn finish<W: Write>(&mut self, sink: &mut W) -> io::Result<()> {
        if let Some(width) = self.width
            && self.column + END_DELIMITER.len() > width
        {
            sink.write_all(b"\n")?;
            self.column = 0;
        }
        self.column += END_DELIMITER.len();
        sink.write_all(END_DELIMITER)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
