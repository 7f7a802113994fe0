use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use log::{debug, trace};
use powercsv_core::{Dialect, Encoder};

use crate::error::Result;
use crate::header::HeaderIndex;
use crate::record::Record;

/// The default capacity of the output buffer, in bytes.
const DEFAULT_BUFFER_CAPACITY: usize = 8 * (1 << 10);

/// Builds a CSV writer with various configuration knobs.
///
/// This builder can be used to tweak the separator, quote and line
/// terminator. Once a `Writer` is built, its configuration cannot be
/// changed.
#[derive(Debug)]
pub struct WriterBuilder {
    dialect: Dialect,
    capacity: usize,
}

impl Default for WriterBuilder {
    fn default() -> WriterBuilder {
        WriterBuilder {
            dialect: Dialect::default(),
            capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl WriterBuilder {
    /// Create a new builder for configuring CSV writing.
    ///
    /// To convert a builder into a writer, call one of the methods starting
    /// with `from_`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::error::Error;
    /// use powercsv::WriterBuilder;
    ///
    /// # fn main() { example().unwrap(); }
    /// fn example() -> Result<(), Box<dyn Error>> {
    ///     let mut wtr = WriterBuilder::new().separator(';').from_writer(vec![]);
    ///     wtr.write_fields(&["a", "b;c"])?;
    ///
    ///     let data = String::from_utf8(wtr.into_inner()?)?;
    ///     assert_eq!(data, "a;\"b;c\"\n");
    ///     Ok(())
    /// }
    /// ```
    pub fn new() -> WriterBuilder {
        WriterBuilder::default()
    }

    /// Build a CSV writer from this configuration that writes data to
    /// `wtr`.
    ///
    /// Note that the CSV writer is buffered automatically, so you should not
    /// wrap `wtr` in a buffered writer.
    pub fn from_writer<W: io::Write>(&self, wtr: W) -> Writer<W> {
        Writer::new(self, wtr)
    }

    /// Build a CSV writer from this configuration that writes data to the
    /// given file path. The file is truncated if it already exists.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Writer<File>> {
        Ok(Writer::new(self, File::create(path)?))
    }

    /// The field separator to use when writing CSV.
    ///
    /// The default is `,`.
    pub fn separator(&mut self, separator: char) -> &mut WriterBuilder {
        self.dialect = self.dialect.with_separator(separator);
        self
    }

    /// The quote character to use when writing CSV.
    ///
    /// The default is `"`.
    pub fn quote(&mut self, quote: char) -> &mut WriterBuilder {
        self.dialect = self.dialect.with_quote(quote);
        self
    }

    /// The line terminator written after every record.
    ///
    /// The default is `\n`.
    pub fn terminator(&mut self, terminator: char) -> &mut WriterBuilder {
        self.dialect = self.dialect.with_terminator(terminator);
        self
    }

    /// Set the separator, quote and terminator all at once.
    pub fn dialect(&mut self, dialect: Dialect) -> &mut WriterBuilder {
        self.dialect = dialect;
        self
    }

    /// Set the capacity (in bytes) of the internal buffer used in the CSV
    /// writer.
    pub fn buffer_capacity(&mut self, capacity: usize) -> &mut WriterBuilder {
        self.capacity = capacity;
        self
    }
}

/// A conversion into a record that may fail.
///
/// This lets the bulk write methods accept both plain records and the
/// results produced by a [`Reader`](struct.Reader.html), so that a reader
/// can be piped straight into a writer.
pub trait IntoRecord {
    /// Convert this value into a record.
    fn into_record(self) -> Result<Record>;
}

impl IntoRecord for Record {
    fn into_record(self) -> Result<Record> {
        Ok(self)
    }
}

impl IntoRecord for Result<Record> {
    fn into_record(self) -> Result<Record> {
        self
    }
}

/// A CSV writer.
///
/// Every record is written as one line: its fields escaped and joined with
/// the separator, followed by the line terminator. A field is quoted only
/// when it contains the separator, the quote or the line terminator.
///
/// When the writer has a header, records shorter than the header are padded
/// with empty fields on output. Longer records are written in full.
///
/// The output is flushed after every record, so each record reaches the
/// underlying writer as soon as it is written.
///
/// # Example
///
/// ```
/// use std::error::Error;
/// use powercsv::Writer;
///
/// # fn main() { example().unwrap(); }
/// fn example() -> Result<(), Box<dyn Error>> {
///     let mut wtr = Writer::from_writer(vec![]);
///     wtr.set_headers(&["name", "age", "note"])?;
///
///     let mut rec = wtr.begin_record();
///     rec.set("name", "Bob")?.set("age", 30)?;
///     rec.emit(&mut wtr)?;
///
///     let data = String::from_utf8(wtr.into_inner()?)?;
///     assert_eq!(data, "name,age,note\nBob,30,\n");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Writer<W: io::Write> {
    wtr: io::BufWriter<W>,
    encoder: Encoder,
    headers: Option<Arc<HeaderIndex>>,
    /// Scratch space for the line being written.
    line: String,
    lines: u64,
}

impl<W: io::Write> Writer<W> {
    fn new(builder: &WriterBuilder, wtr: W) -> Writer<W> {
        Writer {
            wtr: io::BufWriter::with_capacity(builder.capacity, wtr),
            encoder: Encoder::new(builder.dialect),
            headers: None,
            line: String::new(),
            lines: 0,
        }
    }

    /// Build a CSV writer with a default configuration that writes data to
    /// `wtr`.
    pub fn from_writer(wtr: W) -> Writer<W> {
        WriterBuilder::new().from_writer(wtr)
    }

    /// The dialect used by this writer.
    pub fn dialect(&self) -> Dialect {
        self.encoder.dialect()
    }

    /// Set the header and immediately write it as a line.
    pub fn set_headers<I, T>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let headers = Arc::new(HeaderIndex::new(names));
        debug!("writing header with {} columns", headers.len());
        self.write_line(headers.names())?;
        self.headers = Some(headers);
        Ok(())
    }

    /// The current header, if one has been set.
    pub fn headers(&self) -> Option<&HeaderIndex> {
        self.headers.as_ref().map(|h| &**h)
    }

    /// Start a new, empty record bound to this writer's dialect and header.
    ///
    /// Fill it with `append` or `set`, then write it with
    /// [`Record::emit`](struct.Record.html#method.emit) or
    /// [`write_record`](#method.write_record).
    pub fn begin_record(&self) -> Record {
        let mut rec = Record::with_dialect(self.dialect());
        rec.set_headers(self.headers.clone());
        rec
    }

    /// Write a single record.
    ///
    /// The record's own dialect is ignored. This writer's dialect is always
    /// used.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_line(record)
    }

    /// Write a single record given as a sequence of fields.
    pub fn write_fields<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.write_line(fields)
    }

    /// Write every record from the given iterator.
    ///
    /// If this writer has no header yet, the header bound to the first
    /// record (if any) is adopted and written first. Headers bound to later
    /// records are ignored. An error from the iterator stops writing and is
    /// returned.
    ///
    /// # Example
    ///
    /// ```
    /// use std::error::Error;
    /// use powercsv::{Reader, Writer};
    ///
    /// # fn main() { example().unwrap(); }
    /// fn example() -> Result<(), Box<dyn Error>> {
    ///     let mut rdr = Reader::from_reader("a,b\n1,2\n3\n".as_bytes());
    ///     rdr.read_headers()?;
    ///
    ///     let mut wtr = Writer::from_writer(vec![]);
    ///     wtr.write_records(rdr.records())?;
    ///
    ///     let data = String::from_utf8(wtr.into_inner()?)?;
    ///     assert_eq!(data, "a,b\n1,2\n3,\n");
    ///     Ok(())
    /// }
    /// ```
    pub fn write_records<I>(&mut self, records: I) -> Result<u64>
    where
        I: IntoIterator,
        I::Item: IntoRecord,
    {
        let mut count = 0;
        for rec in records {
            let rec = rec.into_record()?;
            if count == 0 && self.headers.is_none() {
                if let Some(headers) = rec.shared_headers() {
                    debug!("adopting header from the first record");
                    self.write_line(headers.names())?;
                    self.headers = Some(headers.clone());
                }
            }
            self.write_record(&rec)?;
            count += 1;
        }
        debug!("wrote {} records", count);
        Ok(count)
    }

    /// The number of lines written so far, including the header.
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Flush the contents of the internal buffer to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.wtr.get_ref()
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        self.wtr.get_mut()
    }

    /// Flush this writer and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        match self.wtr.into_inner() {
            Ok(wtr) => Ok(wtr),
            Err(err) => Err(err.into_error().into()),
        }
    }

    /// Encode one line, pad it to the header and write it out.
    fn write_line<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let dialect = self.encoder.dialect();
        let mut n = 0;
        self.line.clear();
        self.encoder.encode_into(
            fields.into_iter().inspect(|_| n += 1),
            &mut self.line,
        );
        let width = self.headers.as_ref().map_or(0, |h| h.len());
        if n < width {
            trace!("padding record from {} to {} fields", n, width);
            for i in n..width {
                if i > 0 {
                    self.line.push(dialect.separator());
                }
            }
        }
        self.line.push(dialect.terminator());
        self.wtr.write_all(self.line.as_bytes())?;
        self.wtr.flush()?;
        self.lines += 1;
        Ok(())
    }
}

impl Writer<File> {
    /// Build a CSV writer with a default configuration that writes data to
    /// the given file path. The file is truncated if it already exists.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Writer<File>> {
        WriterBuilder::new().from_path(path)
    }
}
