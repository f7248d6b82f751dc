//! Bottom-up line reader
//!
//! Reads a file from its end toward its start in fixed-size chunks and yields
//! complete lines last-first. Only one chunk and one partial line are held in
//! memory at a time, so a scan that stops early never touches the head of a
//! large log.
//!
//! Lines are split on `\n` as bytes and decoded (lossily) only once complete,
//! so a multi-byte character straddling a chunk boundary is kept intact. A
//! trailing `\r` is dropped.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use logcheck::core::services::ReverseLineReader;
//!
//! let reader = ReverseLineReader::new(Cursor::new("one\ntwo\nthree\n"), 4).unwrap();
//! let lines: Vec<String> = reader.map(Result::unwrap).collect();
//! assert_eq!(lines, ["three", "two", "one"]);
//! ```

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Chunk size used when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Iterator over the lines of a seekable source, last line first
#[derive(Debug)]
pub struct ReverseLineReader<R> {
    source: R,
    chunk_size: usize,
    /// Bytes in `[0, cursor)` have not been read yet
    cursor: u64,
    /// Start of the region read so far, up to its first newline
    carry: Option<Vec<u8>>,
    /// Complete lines from the last chunk, in file order
    pending: Vec<Vec<u8>>,
    /// Whether the next chunk is the one at end of file
    at_tail: bool,
    failed: bool,
}

impl ReverseLineReader<File> {
    /// Open `path` for reverse reading
    ///
    /// Fails before any line is produced if the file is missing or unreadable.
    pub fn open(path: &Path, chunk_size: usize) -> io::Result<Self> {
        Self::new(File::open(path)?, chunk_size)
    }
}

impl<R: Read + Seek> ReverseLineReader<R> {
    /// Wrap a seekable source; a `chunk_size` of zero is treated as one
    pub fn new(mut source: R, chunk_size: usize) -> io::Result<Self> {
        let cursor = source.seek(SeekFrom::End(0))?;
        Ok(Self {
            source,
            chunk_size: chunk_size.max(1),
            cursor,
            carry: None,
            pending: Vec::new(),
            at_tail: true,
            failed: false,
        })
    }

    /// Read the chunk ending at the cursor and split it into lines
    fn read_chunk(&mut self) -> io::Result<()> {
        let len = self.cursor.min(self.chunk_size as u64);
        let start = self.cursor - len;

        // len never exceeds chunk_size, which is a usize
        let mut buffer = vec![0; usize::try_from(len).unwrap_or(self.chunk_size)];
        self.source.seek(SeekFrom::Start(start))?;
        self.source.read_exact(&mut buffer)?;
        self.cursor = start;

        if let Some(carry) = self.carry.take() {
            buffer.extend_from_slice(&carry);
        }

        let mut fragments = buffer.split(|&b| b == b'\n');
        let head = fragments.next().map(<[u8]>::to_vec).unwrap_or_default();
        self.pending.extend(fragments.map(<[u8]>::to_vec));

        // the empty fragment after a final newline is not a line
        if self.at_tail && self.pending.last().is_some_and(Vec::is_empty) {
            self.pending.pop();
        }
        self.at_tail = false;
        self.carry = Some(head);
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for ReverseLineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(line) = self.pending.pop() {
                return Some(Ok(decode(line)));
            }
            if self.cursor == 0 {
                return self.carry.take().map(|line| Ok(decode(line)));
            }
            if let Err(err) = self.read_chunk() {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}

fn decode(mut line: Vec<u8>) -> String {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    match String::from_utf8(line) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
