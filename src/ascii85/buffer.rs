// Fixed-size chunking adapters.
//
// `ChunkReader` pulls bounded chunks from a `Read` source; `ChunkWriter`
// stages bytes in a fixed-capacity buffer and forwards them to the sink
// when it fills. Together they decouple the token-at-a-time transform
// from the I/O granularity of the source and sink.

use std::io::{self, Read, Write};

// ---------------------------------------------------------------------------
// ChunkReader
// ---------------------------------------------------------------------------

/// Pulls chunks of at most `capacity` bytes from a source.
pub struct ChunkReader<R: Read> {
    source: R,
    buf: Vec<u8>,
}

impl<R: Read> ChunkReader<R> {
    pub fn with_capacity(capacity: usize, source: R) -> Self {
        Self {
            source,
            buf: vec![0u8; capacity],
        }
    }

    /// Read the next chunk. Returns `None` at end of data.
    ///
    /// Short reads are passed through as-is; chunks are full only when the
    /// source delivers full reads.
    pub fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        let n = self.source.read(&mut self.buf)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(&self.buf[..n]))
        }
    }
}

// ---------------------------------------------------------------------------
// ChunkWriter
// ---------------------------------------------------------------------------

/// Stages output in a fixed-capacity buffer, forwarding to the sink
/// whenever the next write would overflow it. Writes at or above the
/// capacity bypass the stage entirely.
pub struct ChunkWriter<W: Write> {
    sink: W,
    buf: Vec<u8>,
    capacity: usize,
    written: u64,
}

impl<W: Write> ChunkWriter<W> {
    pub fn with_capacity(capacity: usize, sink: W) -> Self {
        Self {
            sink,
            buf: Vec::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    /// Total bytes accepted so far (staged or forwarded).
    pub fn bytes_out(&self) -> u64 {
        self.written
    }

    fn drain(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.sink.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Drain staged bytes and return the underlying sink. The sink itself
    /// is not flushed; that stays with the caller.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.drain()?;
        Ok(self.sink)
    }
}

impl<W: Write> Write for ChunkWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > self.capacity {
            self.drain()?;
        }
        if data.len() >= self.capacity {
            self.sink.write_all(data)?;
        } else {
            self.buf.extend_from_slice(data);
        }
        self.written += data.len() as u64;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.sink.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
