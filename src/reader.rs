use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use log::{debug, trace};
use powercsv_core::{Dialect, LineParser};

use crate::error::Result;
use crate::header::HeaderIndex;
use crate::record::{Position, Record};
use crate::source::CharReader;

/// The default capacity of the input buffer, in bytes.
const DEFAULT_BUFFER_CAPACITY: usize = 8 * (1 << 10);

/// Builds a CSV reader with various configuration knobs.
///
/// This builder can be used to tweak the separator, quote and line
/// terminator, and whether the first line is a header. Once a `Reader` is
/// built, its configuration cannot be changed.
#[derive(Debug)]
pub struct ReaderBuilder {
    dialect: Dialect,
    has_headers: bool,
    capacity: usize,
}

impl Default for ReaderBuilder {
    fn default() -> ReaderBuilder {
        ReaderBuilder {
            dialect: Dialect::default(),
            has_headers: false,
            capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ReaderBuilder {
    /// Create a new builder for configuring CSV parsing.
    ///
    /// To convert a builder into a reader, call one of the methods starting
    /// with `from_`.
    pub fn new() -> ReaderBuilder {
        ReaderBuilder::default()
    }

    /// Build a CSV reader from this configuration that reads data from
    /// `rdr`.
    ///
    /// Note that the CSV reader is buffered automatically, so you should not
    /// wrap `rdr` in a buffered reader.
    ///
    /// # Example
    ///
    /// ```
    /// use std::error::Error;
    /// use powercsv::ReaderBuilder;
    ///
    /// # fn main() { example().unwrap(); }
    /// fn example() -> Result<(), Box<dyn Error>> {
    ///     let data = "\
    /// city;country;pop
    /// Boston;United States;4628910
    /// ";
    ///     let mut rdr = ReaderBuilder::new()
    ///         .separator(';')
    ///         .has_headers(true)
    ///         .from_reader(data.as_bytes());
    ///     for result in rdr.records() {
    ///         let record = result?;
    ///         assert_eq!(record.get_by_name("city")?, Some("Boston"));
    ///         assert_eq!(record.get_long_by_name("pop")?, Some(4628910));
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn from_reader<R: io::Read>(&self, rdr: R) -> Reader<R> {
        Reader::new(self, rdr)
    }

    /// Build a CSV reader from this configuration that reads data from the
    /// given file path. The file is closed when the reader is dropped.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Reader<File>> {
        Ok(Reader::new(self, File::open(path)?))
    }

    /// The field separator to use when parsing CSV.
    ///
    /// The default is `,`.
    pub fn separator(&mut self, separator: char) -> &mut ReaderBuilder {
        self.dialect = self.dialect.with_separator(separator);
        self
    }

    /// The quote character to use when parsing CSV.
    ///
    /// The default is `"`.
    pub fn quote(&mut self, quote: char) -> &mut ReaderBuilder {
        self.dialect = self.dialect.with_quote(quote);
        self
    }

    /// The line terminator to use when parsing CSV.
    ///
    /// The default is `\n`. A `\r` outside of quotes is always dropped, so
    /// `\r\n` terminated data is read correctly with the default.
    pub fn terminator(&mut self, terminator: char) -> &mut ReaderBuilder {
        self.dialect = self.dialect.with_terminator(terminator);
        self
    }

    /// Set the separator, quote and terminator all at once.
    pub fn dialect(&mut self, dialect: Dialect) -> &mut ReaderBuilder {
        self.dialect = dialect;
        self
    }

    /// Whether to treat the first line as a header.
    ///
    /// When enabled, the first line not consumed by `skip_line` is read as
    /// the header before the first record is returned, and every record is
    /// bound to it.
    ///
    /// This is disabled by default.
    pub fn has_headers(&mut self, yes: bool) -> &mut ReaderBuilder {
        self.has_headers = yes;
        self
    }

    /// Set the capacity (in bytes) of the buffer used in the CSV reader.
    pub fn buffer_capacity(&mut self, capacity: usize) -> &mut ReaderBuilder {
        self.capacity = capacity;
        self
    }
}

/// A streaming CSV reader.
///
/// The reader pulls characters from an underlying `io::Read` and produces
/// one [`Record`](struct.Record.html) per logical line. Nothing beyond the
/// current line is buffered, aside from the fixed size input buffer.
///
/// Records are produced lazily and only once: the reader never rewinds. To
/// read the same data again, build a new reader over a fresh source.
///
/// Every record is bound to the reader's header, if one has been read or
/// set, and shares it rather than copying it.
///
/// # Lines
///
/// An empty line produces a record with a single empty field. If the input
/// ends in the middle of a line, that line still produces a record. Input
/// that ends right after a line terminator produces nothing more.
///
/// # Errors
///
/// The only errors a reader returns are I/O errors from the underlying
/// source. After one, the reader is exhausted. Quoting is never validated.
#[derive(Debug)]
pub struct Reader<R> {
    src: CharReader<R>,
    parser: LineParser,
    headers: Option<Arc<HeaderIndex>>,
    /// Whether the header should be read before the next record.
    headers_pending: bool,
    eof: bool,
    chars: u64,
    lines: u64,
    records: u64,
}

impl<R: io::Read> Reader<R> {
    fn new(builder: &ReaderBuilder, rdr: R) -> Reader<R> {
        Reader {
            src: CharReader::new(rdr, builder.capacity),
            parser: LineParser::new(builder.dialect),
            headers: None,
            headers_pending: builder.has_headers,
            eof: false,
            chars: 0,
            lines: 1,
            records: 0,
        }
    }

    /// Create a new CSV reader with the default configuration.
    ///
    /// The default configuration does not read a header. Use
    /// [`read_headers`](#method.read_headers) or a
    /// [`ReaderBuilder`](struct.ReaderBuilder.html) for that.
    pub fn from_reader(rdr: R) -> Reader<R> {
        ReaderBuilder::new().from_reader(rdr)
    }

    /// The dialect used by this reader.
    pub fn dialect(&self) -> Dialect {
        self.parser.dialect()
    }

    /// Read the next line and make it the header.
    ///
    /// The header is bound to every record produced afterwards. If the input
    /// ends before a line terminator, whatever was read still becomes the
    /// header. If the input is already exhausted, the header is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use powercsv::Reader;
    ///
    /// let mut rdr = Reader::from_reader("a,b,a\n1,2,3\n".as_bytes());
    /// assert_eq!(rdr.read_headers().unwrap().lookup("a"), Some(2));
    /// let rec = rdr.read_record().unwrap().unwrap();
    /// assert_eq!(rec.get_int_by_name("a").unwrap(), Some(3));
    /// ```
    pub fn read_headers(&mut self) -> Result<&HeaderIndex> {
        self.headers_pending = false;
        let names = self.read_line()?.unwrap_or_default();
        debug!("read header with {} columns", names.len());
        let headers = Arc::new(HeaderIndex::new(names));
        Ok(&**self.headers.insert(headers))
    }

    /// Set the header explicitly, without reading any input.
    ///
    /// This also cancels a pending header read requested with
    /// [`ReaderBuilder::has_headers`](struct.ReaderBuilder.html#method.has_headers).
    pub fn set_headers<I, T>(&mut self, names: I) -> &HeaderIndex
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.headers_pending = false;
        let headers = Arc::new(HeaderIndex::new(names));
        debug!("header set with {} columns", headers.len());
        &**self.headers.insert(headers)
    }

    /// The current header, if one has been read or set.
    pub fn headers(&self) -> Option<&HeaderIndex> {
        self.headers.as_ref().map(|h| &**h)
    }

    /// Skip one logical line.
    ///
    /// Quoting is honored, so a quoted line terminator does not end the
    /// line. Returns `false` if the input was already exhausted.
    pub fn skip_line(&mut self) -> Result<bool> {
        match self.read_line()? {
            None => Ok(false),
            Some(fields) => {
                trace!("skipped line with {} fields", fields.len());
                Ok(true)
            }
        }
    }

    /// Skip up to `n` logical lines and return how many were skipped.
    pub fn skip_lines(&mut self, n: usize) -> Result<usize> {
        for i in 0..n {
            if !self.skip_line()? {
                return Ok(i);
            }
        }
        Ok(n)
    }

    /// Read the next record.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.headers_pending {
            self.read_headers()?;
        }
        let pos = self.position();
        match self.read_line()? {
            None => Ok(None),
            Some(fields) => Ok(Some(Record::from_parts(
                fields,
                self.dialect(),
                self.headers.clone(),
                Some(pos),
            ))),
        }
    }

    /// Returns a borrowed iterator over all remaining records.
    ///
    /// Each item yielded by this iterator is a `Result<Record, Error>`.
    pub fn records(&mut self) -> RecordsIter<R> {
        RecordsIter { rdr: self }
    }

    /// Returns an owned iterator over all remaining records.
    ///
    /// The underlying source is dropped, and therefore closed if it is a
    /// file, when the iterator is dropped.
    pub fn into_records(self) -> RecordsIntoIter<R> {
        RecordsIntoIter { rdr: self }
    }

    /// The position of the start of the next line.
    pub fn position(&self) -> Position {
        let mut pos = Position::new();
        pos.set_char(self.chars).set_line(self.lines).set_record(self.records);
        pos
    }

    /// Returns true once the underlying source has been exhausted.
    pub fn is_done(&self) -> bool {
        self.eof
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.src.get_ref()
    }

    /// Returns a mutable reference to the underlying reader.
    ///
    /// Reading from it directly corrupts the state of this reader.
    pub fn get_mut(&mut self) -> &mut R {
        self.src.get_mut()
    }

    /// Unwraps this CSV reader, returning the underlying reader.
    ///
    /// Buffered input that has not been parsed yet is lost.
    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }

    /// Feed characters to the parser until a line completes or the input
    /// ends. Returns `None` if the input was exhausted before any character
    /// of a new line was seen.
    fn read_line(&mut self) -> Result<Option<Vec<String>>> {
        if self.eof {
            return Ok(None);
        }
        loop {
            let next = match self.src.next_char() {
                Ok(next) => next,
                Err(err) => {
                    self.eof = true;
                    return Err(err.into());
                }
            };
            let c = match next {
                Some(c) => c,
                None => {
                    self.eof = true;
                    if !self.parser.is_started() {
                        return Ok(None);
                    }
                    trace!("closing unterminated line at end of input");
                    self.parser.complete_line();
                    self.records += 1;
                    return Ok(Some(self.parser.finish()));
                }
            };
            self.chars += 1;
            if c == '\n' {
                self.lines += 1;
            }
            if self.parser.consume(c) {
                self.records += 1;
                return Ok(Some(self.parser.finish()));
            }
        }
    }
}

impl Reader<File> {
    /// Create a new CSV reader with the default configuration for the file
    /// at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<File>> {
        ReaderBuilder::new().from_path(path)
    }
}

/// A borrowed iterator over the records of a CSV reader.
///
/// The lifetime parameter `'r` refers to the lifetime of the underlying CSV
/// `Reader`.
#[derive(Debug)]
pub struct RecordsIter<'r, R: 'r> {
    rdr: &'r mut Reader<R>,
}

impl<'r, R: io::Read> RecordsIter<'r, R> {
    /// Return a reference to the underlying CSV reader.
    pub fn reader(&self) -> &Reader<R> {
        &self.rdr
    }

    /// Return a mutable reference to the underlying CSV reader.
    pub fn reader_mut(&mut self) -> &mut Reader<R> {
        &mut self.rdr
    }
}

impl<'r, R: io::Read> Iterator for RecordsIter<'r, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        self.rdr.read_record().transpose()
    }
}

/// An owned iterator over the records of a CSV reader.
#[derive(Debug)]
pub struct RecordsIntoIter<R> {
    rdr: Reader<R>,
}

impl<R: io::Read> RecordsIntoIter<R> {
    /// Return a reference to the underlying CSV reader.
    pub fn reader(&self) -> &Reader<R> {
        &self.rdr
    }

    /// Return a mutable reference to the underlying CSV reader.
    pub fn reader_mut(&mut self) -> &mut Reader<R> {
        &mut self.rdr
    }

    /// Drop this iterator and return the underlying CSV reader.
    pub fn into_reader(self) -> Reader<R> {
        self.rdr
    }
}

impl<R: io::Read> Iterator for RecordsIntoIter<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        self.rdr.read_record().transpose()
    }
}
