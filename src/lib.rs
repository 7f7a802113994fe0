/*!
The `powercsv` crate provides a streaming CSV reader and writer built around
a single record type that supports access by column name and typed parsing.

# Overview

A [`Reader`](struct.Reader.html) turns any `io::Read` into a lazy sequence of
[`Record`](struct.Record.html)s, one per logical line. A
[`Writer`](struct.Writer.html) does the reverse for any `io::Write`. Both can
be configured with a [`Dialect`](struct.Dialect.html): the separator, the
quote character and the line terminator.

When a header is read or set, it is shared by every record as a
[`HeaderIndex`](struct.HeaderIndex.html), and fields can be read and written
by column name. Blank fields parse as absent values rather than errors.

Parsing is permissive: malformed quoting never produces an error. The only
errors come from I/O, from name lookups and from parsing field text into a
typed value.

# Example

```
use std::error::Error;
use powercsv::{Reader, Writer};

# fn main() { example().unwrap(); }
fn example() -> Result<(), Box<dyn Error>> {
    let data = "\
name,qty,price
apple,3,0.5
pear,,1.25
";
    let mut rdr = Reader::from_reader(data.as_bytes());
    rdr.read_headers()?;

    let mut wtr = Writer::from_writer(vec![]);
    wtr.set_headers(&["name", "total"])?;
    for result in rdr.records() {
        let rec = result?;
        let qty = rec.get_int_by_name_or("qty", 1)?;
        let price = rec.get_double_by_name_or("price", 0.0)?;

        let mut out = wtr.begin_record();
        out.set("name", rec.get_by_name("name")?)?;
        out.set("total", f64::from(qty) * price)?;
        out.emit(&mut wtr)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    assert_eq!(data, "name,total\napple,1.5\npear,1.25\n");
    Ok(())
}
```

# Serde

With the default `serde` feature, `Record` and `HeaderIndex` implement
`Serialize` and `Deserialize` as sequences of strings.
*/

#![deny(missing_docs)]

use std::fs::File;
use std::path::Path;

pub use powercsv_core::{Dialect, Encoder, LineParser};

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::header::{HeaderIndex, HeaderIter};
pub use crate::reader::{Reader, ReaderBuilder, RecordsIntoIter, RecordsIter};
pub use crate::record::{IntoField, Position, Record, RecordIter};
pub use crate::writer::{IntoRecord, Writer, WriterBuilder};

mod error;
mod header;
mod reader;
mod record;
#[cfg(feature = "serde")]
mod serde_impl;
mod source;
mod writer;

/// Open the file at `path` and return an iterator over its records.
///
/// No header is read. The file is closed when the iterator is dropped.
pub fn lines<P: AsRef<Path>>(path: P) -> Result<RecordsIntoIter<File>> {
    Ok(Reader::from_path(path)?.into_records())
}

/// Open the file at `path`, read its first line as the header and return an
/// iterator over the remaining records.
///
/// The header is available through
/// [`RecordsIntoIter::reader`](struct.RecordsIntoIter.html#method.reader)
/// and is bound to every record.
pub fn lines_with_headers<P: AsRef<Path>>(
    path: P,
) -> Result<RecordsIntoIter<File>> {
    let mut rdr = Reader::from_path(path)?;
    rdr.read_headers()?;
    Ok(rdr.into_records())
}

/// Write every record to the file at `path`, replacing its contents.
///
/// The header bound to the first record, if any, is written first. Returns
/// the number of records written.
pub fn write_path<P, I>(path: P, records: I) -> Result<u64>
where
    P: AsRef<Path>,
    I: IntoIterator,
    I::Item: IntoRecord,
{
    let mut wtr = Writer::from_path(path)?;
    let n = wtr.write_records(records)?;
    wtr.flush()?;
    Ok(n)
}

/// Write a header and then every record to the file at `path`, replacing
/// its contents.
///
/// The header is produced by `headers` once the file has been created.
/// Returns the number of records written, not counting the header.
pub fn write_path_with_headers<P, F, H, T, I>(
    path: P,
    headers: F,
    records: I,
) -> Result<u64>
where
    P: AsRef<Path>,
    F: FnOnce() -> H,
    H: IntoIterator<Item = T>,
    T: AsRef<str>,
    I: IntoIterator,
    I::Item: IntoRecord,
{
    let mut wtr = Writer::from_path(path)?;
    wtr.set_headers(headers())?;
    let n = wtr.write_records(records)?;
    wtr.flush()?;
    Ok(n)
}
