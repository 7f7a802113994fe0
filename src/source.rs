use std::cmp;
use std::io;

/// The replacement for byte sequences that are not valid UTF-8.
const REPLACEMENT: char = '\u{FFFD}';

/// The longest possible UTF-8 encoding of a single `char`.
const MAX_UTF8_LEN: usize = 4;

/// A buffered source of `char`s decoded from an `io::Read`.
///
/// Bytes are decoded as UTF-8. Invalid sequences are replaced with
/// U+FFFD, one replacement per maximal invalid prefix, and a sequence that
/// is split across two reads is reassembled before decoding.
#[derive(Debug)]
pub(crate) struct CharReader<R> {
    rdr: R,
    buf: Vec<u8>,
    /// Start of the unread bytes in `buf`.
    pos: usize,
    /// End of the valid bytes in `buf`.
    end: usize,
    eof: bool,
}

impl<R: io::Read> CharReader<R> {
    pub(crate) fn new(rdr: R, capacity: usize) -> CharReader<R> {
        CharReader {
            rdr,
            buf: vec![0; cmp::max(capacity, MAX_UTF8_LEN)],
            pos: 0,
            end: 0,
            eof: false,
        }
    }

    pub(crate) fn get_ref(&self) -> &R {
        &self.rdr
    }

    pub(crate) fn get_mut(&mut self) -> &mut R {
        &mut self.rdr
    }

    pub(crate) fn into_inner(self) -> R {
        self.rdr
    }

    /// Return the next character, or `None` at the end of the input.
    pub(crate) fn next_char(&mut self) -> io::Result<Option<char>> {
        loop {
            let avail = &self.buf[self.pos..self.end];
            if avail.is_empty() {
                if self.eof {
                    return Ok(None);
                }
                self.fill()?;
                continue;
            }
            let (ch, size) = bstr::decode_utf8(avail);
            match ch {
                Some(ch) => {
                    self.pos += size;
                    return Ok(Some(ch));
                }
                // The sequence may only be cut short by the end of the
                // buffer, so read more before giving up on it.
                None if avail.len() < MAX_UTF8_LEN && !self.eof => {
                    self.fill()?;
                }
                None => {
                    self.pos += cmp::max(size, 1);
                    return Ok(Some(REPLACEMENT));
                }
            }
        }
    }

    /// Move unread bytes to the front of the buffer and read more after
    /// them. Sets `eof` when the underlying reader is exhausted.
    fn fill(&mut self) -> io::Result<()> {
        self.buf.copy_within(self.pos..self.end, 0);
        self.end -= self.pos;
        self.pos = 0;
        loop {
            match self.rdr.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}
