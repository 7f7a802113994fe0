use std::any;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::iter::FromIterator;
use std::ops;
use std::slice;
use std::str::FromStr;
use std::sync::Arc;

use powercsv_core::{Dialect, Encoder, LineParser};
use bigdecimal::BigDecimal;

use crate::error::{new_error, ErrorKind, Result};
use crate::header::HeaderIndex;
use crate::writer::Writer;

/// The position of a record in the data it was read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    char: u64,
    line: u64,
    record: u64,
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

impl Position {
    /// Returns a new position initialized to the start value.
    pub fn new() -> Position {
        Position { char: 0, line: 1, record: 0 }
    }

    /// The character offset, starting at `0`, of this position.
    pub fn char(&self) -> u64 {
        self.char
    }

    /// The physical line number, starting at `1`, of this position.
    ///
    /// Lines are counted by occurrences of `\n`, regardless of the
    /// configured line terminator.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// The record index, starting at `0`, of this position.
    pub fn record(&self) -> u64 {
        self.record
    }

    pub(crate) fn set_char(&mut self, char: u64) -> &mut Position {
        self.char = char;
        self
    }

    pub(crate) fn set_line(&mut self, line: u64) -> &mut Position {
        self.line = line;
        self
    }

    pub(crate) fn set_record(&mut self, record: u64) -> &mut Position {
        self.record = record;
        self
    }
}

/// A conversion of a value into the text of a single field.
///
/// Integers and floats are formatted without going through `fmt`. An absent
/// value (`None`) becomes the empty string.
pub trait IntoField {
    /// Convert this value into field text.
    fn into_field(self) -> String;
}

impl IntoField for String {
    fn into_field(self) -> String {
        self
    }
}

impl<'a> IntoField for &'a str {
    fn into_field(self) -> String {
        self.to_string()
    }
}

impl<'a> IntoField for &'a String {
    fn into_field(self) -> String {
        self.clone()
    }
}

impl<'a> IntoField for Cow<'a, str> {
    fn into_field(self) -> String {
        self.into_owned()
    }
}

impl IntoField for char {
    fn into_field(self) -> String {
        self.to_string()
    }
}

impl IntoField for bool {
    fn into_field(self) -> String {
        String::from(if self { "true" } else { "false" })
    }
}

impl IntoField for BigDecimal {
    fn into_field(self) -> String {
        self.to_string()
    }
}

impl<'a> IntoField for &'a BigDecimal {
    fn into_field(self) -> String {
        self.to_string()
    }
}

impl<T: IntoField> IntoField for Option<T> {
    fn into_field(self) -> String {
        match self {
            None => String::new(),
            Some(v) => v.into_field(),
        }
    }
}

macro_rules! into_field_int {
    ($($ty:ty),*) => {
        $(
            impl IntoField for $ty {
                fn into_field(self) -> String {
                    let mut buf = itoa::Buffer::new();
                    buf.format(self).to_string()
                }
            }
        )*
    }
}

macro_rules! into_field_float {
    ($($ty:ty),*) => {
        $(
            impl IntoField for $ty {
                fn into_field(self) -> String {
                    let mut buf = ryu::Buffer::new();
                    buf.format(self).to_string()
                }
            }
        )*
    }
}

into_field_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
into_field_float!(f32, f64);

/// Resolve a column name against the given headers.
fn resolve(headers: Option<&Arc<HeaderIndex>>, name: &str) -> Result<usize> {
    match headers {
        None => Err(new_error(ErrorKind::HeaderNotDefined)),
        Some(headers) => headers.resolve(name),
    }
}

/// A single line of CSV data: an ordered sequence of fields.
///
/// A record is append only. Fields can be pushed with
/// [`append`](#method.append) and overwritten with [`set`](#method.set), but
/// never removed. Every removal-style method returns an
/// `UnsupportedMutation` error and leaves the record untouched. This
/// matches its role as a write buffer whose contents may already be on
/// their way downstream.
///
/// A record may be bound to a [`HeaderIndex`](struct.HeaderIndex.html),
/// which enables access by column name. Records produced by a
/// [`Reader`](struct.Reader.html) share the reader's header, and records
/// created with [`Writer::begin_record`](struct.Writer.html#method.begin_record)
/// share the writer's.
///
/// Two records are equal when their fields are equal. Headers, dialect and
/// position are not compared.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use powercsv::{HeaderIndex, Record};
///
/// let headers = Arc::new(HeaderIndex::new(&["name", "age", "score"]));
/// let mut rec = Record::new().with_headers(headers);
/// rec.append("Bob");
/// rec.set("score", 9.5).unwrap();
///
/// assert_eq!(rec, vec!["Bob", "", "9.5"]);
/// assert_eq!(rec.get_int_by_name("age").unwrap(), None);
/// assert_eq!(rec.get_double_by_name("score").unwrap(), Some(9.5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Record {
    fields: Vec<String>,
    headers: Option<Arc<HeaderIndex>>,
    dialect: Dialect,
    position: Option<Position>,
}

macro_rules! typed_getters {
    (
        $ty:ty, $name:literal,
        $get:ident, $get_or:ident, $get_by_name:ident, $get_by_name_or:ident
    ) => {
        #[doc = concat!("Parse the field at index `i` as ", $name, ".")]
        ///
        /// A missing or blank field yields `None`. Surrounding whitespace is
        /// ignored. Text that does not parse is an error.
        pub fn $get(&self, i: usize) -> Result<Option<$ty>> {
            self.parse(i)
        }

        #[doc = concat!(
            "Parse the field at index `i` as ", $name,
            ", returning `default` when the field is missing or blank."
        )]
        pub fn $get_or(&self, i: usize, default: $ty) -> Result<$ty> {
            self.parse_or(i, default)
        }

        #[doc = concat!(
            "Parse the field in the named column as ", $name, "."
        )]
        pub fn $get_by_name(&self, name: &str) -> Result<Option<$ty>> {
            self.parse_by_name(name)
        }

        #[doc = concat!(
            "Parse the field in the named column as ", $name,
            ", returning `default` when the field is missing or blank."
        )]
        pub fn $get_by_name_or(
            &self,
            name: &str,
            default: $ty,
        ) -> Result<$ty> {
            self.parse_by_name_or(name, default)
        }
    };
}

impl Record {
    /// Create a new empty record with the default dialect and no header.
    pub fn new() -> Record {
        Record::with_dialect(Dialect::default())
    }

    /// Create a new empty record that renders itself with the given
    /// dialect.
    pub fn with_dialect(dialect: Dialect) -> Record {
        Record { fields: vec![], headers: None, dialect, position: None }
    }

    /// Create a record from a sequence of values.
    ///
    /// ```
    /// use powercsv::Record;
    ///
    /// let rec = Record::from_fields(vec![Some(1), None, Some(3)]);
    /// assert_eq!(rec, vec!["1", "", "3"]);
    /// ```
    pub fn from_fields<I, T>(fields: I) -> Record
    where
        I: IntoIterator<Item = T>,
        T: IntoField,
    {
        let mut rec = Record::new();
        rec.extend_fields(fields);
        rec
    }

    /// Parse one line of text into a record.
    ///
    /// Parsing stops at the first line terminator outside of quotes. A line
    /// without a terminator is parsed in full.
    ///
    /// ```
    /// use powercsv::Record;
    /// use powercsv_core::Dialect;
    ///
    /// let rec = Record::parse_line(Dialect::default(), "\"a,b\",c\n");
    /// assert_eq!(rec, vec!["a,b", "c"]);
    /// ```
    pub fn parse_line(dialect: Dialect, line: &str) -> Record {
        let mut rec = Record::with_dialect(dialect);
        rec.fields = LineParser::parse(dialect, line);
        rec
    }

    pub(crate) fn from_parts(
        fields: Vec<String>,
        dialect: Dialect,
        headers: Option<Arc<HeaderIndex>>,
        position: Option<Position>,
    ) -> Record {
        Record { fields, headers, dialect, position }
    }

    /// Bind this record to the given header and return it.
    pub fn with_headers(mut self, headers: Arc<HeaderIndex>) -> Record {
        self.headers = Some(headers);
        self
    }

    /// Bind this record to the given header, or unbind it with `None`.
    pub fn set_headers(&mut self, headers: Option<Arc<HeaderIndex>>) {
        self.headers = headers;
    }

    /// The header bound to this record, if any.
    pub fn headers(&self) -> Option<&HeaderIndex> {
        self.headers.as_ref().map(|h| &**h)
    }

    pub(crate) fn shared_headers(&self) -> Option<&Arc<HeaderIndex>> {
        self.headers.as_ref()
    }

    /// The dialect this record renders itself with.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The position this record was read from, if it came from a reader.
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Look up the position of a column by name.
    ///
    /// This returns a `HeaderNotDefined` error when no header is bound, and
    /// `None` when the bound header has no such column.
    pub fn column(&self, name: &str) -> Result<Option<usize>> {
        match self.headers {
            None => Err(new_error(ErrorKind::HeaderNotDefined)),
            Some(ref headers) => Ok(headers.lookup(name)),
        }
    }

    /// Returns the number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if and only if this record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if any field is exactly equal to `value`.
    pub fn contains(&self, value: &str) -> bool {
        self.fields.iter().any(|f| f == value)
    }

    /// Return the field at index `i`.
    ///
    /// If no field at index `i` exists, then this returns `None`.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.fields.get(i).map(|f| &**f)
    }

    /// Returns an iterator over all fields in this record.
    pub fn iter(&self) -> RecordIter {
        RecordIter(self.fields.iter())
    }

    /// Returns the fields of this record as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    /// Convert this record into its fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Push a value as a new field at the end of this record.
    pub fn append<V: IntoField>(&mut self, value: V) -> &mut Record {
        self.fields.push(value.into_field());
        self
    }

    /// Push every value as a new field at the end of this record.
    pub fn extend_fields<I, T>(&mut self, values: I) -> &mut Record
    where
        I: IntoIterator<Item = T>,
        T: IntoField,
    {
        self.fields.extend(values.into_iter().map(IntoField::into_field));
        self
    }

    /// Overwrite the field in the named column.
    ///
    /// If the record is shorter than the column's position, it is first
    /// padded with empty fields.
    ///
    /// This returns a `HeaderNotDefined` error when no header is bound and
    /// a `ColumnNotExist` error when the name does not resolve. The record
    /// is unchanged on error.
    pub fn set<V: IntoField>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<&mut Record> {
        let i = resolve(self.headers.as_ref(), name)?;
        if self.fields.len() <= i {
            self.fields.resize(i + 1, String::new());
        }
        self.fields[i] = value.into_field();
        Ok(self)
    }

    /// Return the field at index `i`, or `default` if there is no such
    /// field.
    pub fn get_or<'a>(&'a self, i: usize, default: &'a str) -> &'a str {
        self.get(i).unwrap_or(default)
    }

    /// Return the field in the named column.
    ///
    /// A column that resolves past the end of this record yields `None`.
    pub fn get_by_name(&self, name: &str) -> Result<Option<&str>> {
        let i = resolve(self.headers.as_ref(), name)?;
        Ok(self.get(i))
    }

    /// Return the field in the named column, or `default` if the column
    /// resolves past the end of this record.
    pub fn get_by_name_or<'a>(
        &'a self,
        name: &str,
        default: &'a str,
    ) -> Result<&'a str> {
        Ok(self.get_by_name(name)?.unwrap_or(default))
    }

    /// Parse the field at index `i` into any type implementing `FromStr`.
    ///
    /// The field is trimmed first. A missing or blank field yields `None`.
    /// A field that fails to parse yields a `Parse` error.
    pub fn parse<T>(&self, i: usize) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        let value = match self.get(i) {
            None => return Ok(None),
            Some(value) => value.trim(),
        };
        if value.is_empty() {
            return Ok(None);
        }
        match value.parse() {
            Ok(v) => Ok(Some(v)),
            Err(err) => Err(new_error(ErrorKind::Parse {
                column: i,
                value: value.to_string(),
                ty: any::type_name::<T>(),
                err: Box::new(err),
            })),
        }
    }

    /// Like `parse`, but returns `default` for a missing or blank field.
    pub fn parse_or<T>(&self, i: usize, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        Ok(self.parse(i)?.unwrap_or(default))
    }

    /// Like `parse`, but addresses the field by column name.
    pub fn parse_by_name<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        let i = resolve(self.headers.as_ref(), name)?;
        self.parse(i)
    }

    /// Like `parse_or`, but addresses the field by column name.
    pub fn parse_by_name_or<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: StdError + Send + Sync + 'static,
    {
        Ok(self.parse_by_name(name)?.unwrap_or(default))
    }

    typed_getters!(
        i32,
        "an `i32`",
        get_int,
        get_int_or,
        get_int_by_name,
        get_int_by_name_or
    );
    typed_getters!(
        i64,
        "an `i64`",
        get_long,
        get_long_or,
        get_long_by_name,
        get_long_by_name_or
    );
    typed_getters!(
        BigDecimal,
        "an arbitrary precision `BigDecimal`",
        get_decimal,
        get_decimal_or,
        get_decimal_by_name,
        get_decimal_by_name_or
    );
    typed_getters!(
        f64,
        "an `f64`",
        get_double,
        get_double_or,
        get_double_by_name,
        get_double_by_name_or
    );
    /// Read the field at index `i` as a `bool`.
    ///
    /// A missing or blank field yields `None`. Otherwise the trimmed text is
    /// `true` when it equals `true` ignoring ASCII case, and `false` for
    /// anything else. This never fails to parse.
    pub fn get_bool(&self, i: usize) -> Result<Option<bool>> {
        Ok(self.get(i).and_then(lenient_bool))
    }

    /// Like `get_bool`, but returns `default` for a missing or blank field.
    pub fn get_bool_or(&self, i: usize, default: bool) -> Result<bool> {
        Ok(self.get_bool(i)?.unwrap_or(default))
    }

    /// Like `get_bool`, but addresses the field by column name.
    pub fn get_bool_by_name(&self, name: &str) -> Result<Option<bool>> {
        let i = resolve(self.headers.as_ref(), name)?;
        self.get_bool(i)
    }

    /// Like `get_bool_or`, but addresses the field by column name.
    pub fn get_bool_by_name_or(
        &self,
        name: &str,
        default: bool,
    ) -> Result<bool> {
        Ok(self.get_bool_by_name(name)?.unwrap_or(default))
    }

    /// Removing fields is not supported. This always returns an
    /// `UnsupportedMutation` error.
    pub fn remove(&mut self, _i: usize) -> Result<String> {
        Err(unsupported("remove"))
    }

    /// Removing fields is not supported. This always returns an
    /// `UnsupportedMutation` error.
    pub fn remove_value(&mut self, _value: &str) -> Result<bool> {
        Err(unsupported("remove_value"))
    }

    /// Removing fields is not supported. This always returns an
    /// `UnsupportedMutation` error.
    pub fn retain<F>(&mut self, _keep: F) -> Result<()>
    where
        F: FnMut(&str) -> bool,
    {
        Err(unsupported("retain"))
    }

    /// Removing fields is not supported. This always returns an
    /// `UnsupportedMutation` error.
    pub fn truncate(&mut self, _len: usize) -> Result<()> {
        Err(unsupported("truncate"))
    }

    /// Removing fields is not supported. This always returns an
    /// `UnsupportedMutation` error.
    pub fn clear(&mut self) -> Result<()> {
        Err(unsupported("clear"))
    }

    /// Write this record with the given writer.
    ///
    /// This is the terminal step of a record started with
    /// [`Writer::begin_record`](struct.Writer.html#method.begin_record).
    pub fn emit<W: io::Write>(&self, wtr: &mut Writer<W>) -> Result<()> {
        wtr.write_record(self)
    }
}

fn lenient_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.eq_ignore_ascii_case("true"))
    }
}

fn unsupported(op: &'static str) -> crate::error::Error {
    new_error(ErrorKind::UnsupportedMutation { op })
}

impl PartialEq for Record {
    fn eq(&self, other: &Record) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Record {}

impl<T: AsRef<str>> PartialEq<[T]> for Record {
    fn eq(&self, other: &[T]) -> bool {
        self.fields.len() == other.len()
            && self.fields.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<'a, T: AsRef<str>> PartialEq<&'a [T]> for Record {
    fn eq(&self, other: &&'a [T]) -> bool {
        *self == **other
    }
}

impl<T: AsRef<str>> PartialEq<Vec<T>> for Record {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == **other
    }
}

impl fmt::Display for Record {
    /// Render this record as one line of text, without a line terminator.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let enc = Encoder::new(self.dialect);
        f.write_str(&enc.encode_line(&self.fields))
    }
}

impl ops::Index<usize> for Record {
    type Output = str;
    fn index(&self, i: usize) -> &str {
        &self.fields[i]
    }
}

impl<T: IntoField> Extend<T> for Record {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.extend_fields(iter);
    }
}

impl<T: IntoField> FromIterator<T> for Record {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Record {
        Record::from_fields(iter)
    }
}

impl<'a> IntoIterator for &'a Record {
    type IntoIter = RecordIter<'a>;
    type Item = &'a str;

    fn into_iter(self) -> RecordIter<'a> {
        self.iter()
    }
}

/// An iterator over the fields in a record.
#[derive(Clone, Debug)]
pub struct RecordIter<'a>(slice::Iter<'a, String>);

impl<'a> Iterator for RecordIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.0.next().map(|f| &**f)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> DoubleEndedIterator for RecordIter<'a> {
    fn next_back(&mut self) -> Option<&'a str> {
        self.0.next_back().map(|f| &**f)
    }
}

impl<'a> ExactSizeIterator for RecordIter<'a> {}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use powercsv_core::Dialect;
    use bigdecimal::BigDecimal;

    use super::Record;
    use crate::error::ErrorKind;
    use crate::header::HeaderIndex;

    fn headers(names: &[&str]) -> Arc<HeaderIndex> {
        Arc::new(HeaderIndex::new(names))
    }

    fn rec(fields: &[&str]) -> Record {
        Record::from_fields(fields.iter().cloned())
    }

    #[test]
    fn append_converts_values() {
        let mut r = Record::new();
        r.append("a")
            .append(String::from("b"))
            .append(42u8)
            .append(-7i64)
            .append(1.5f64)
            .append(1.0f32)
            .append(true)
            .append('c')
            .append(None::<&str>)
            .append(Some(3))
            .append(BigDecimal::from_str("10.250").unwrap());
        assert_eq!(
            r,
            vec!["a", "b", "42", "-7", "1.5", "1.0", "true", "c", "", "3", "10.250"]
        );
    }

    #[test]
    fn set_pads_and_overwrites() {
        let mut r = Record::new().with_headers(headers(&["a", "b", "c"]));
        r.set("c", "z").unwrap();
        assert_eq!(r, vec!["", "", "z"]);
        r.set("a", 1).unwrap().set("c", "y").unwrap();
        assert_eq!(r, vec!["1", "", "y"]);
        r.append("extra");
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn set_without_headers_fails() {
        let mut r = rec(&["x"]);
        match r.set("a", "v").unwrap_err().into_kind() {
            ErrorKind::HeaderNotDefined => {}
            kind => panic!("unexpected error kind: {:?}", kind),
        }
        assert_eq!(r, vec!["x"]);
    }

    #[test]
    fn set_unknown_column_fails() {
        let mut r = Record::new().with_headers(headers(&["a"]));
        match r.set("b", "v").unwrap_err().into_kind() {
            ErrorKind::ColumnNotExist { name } => assert_eq!(name, "b"),
            kind => panic!("unexpected error kind: {:?}", kind),
        }
        assert!(r.is_empty());
    }

    #[test]
    fn removal_is_unsupported() {
        let mut r = rec(&["a", "b"]);
        let errs = vec![
            r.remove(0).unwrap_err(),
            r.remove_value("a").unwrap_err(),
            r.retain(|_| false).unwrap_err(),
            r.truncate(0).unwrap_err(),
            r.clear().unwrap_err(),
        ];
        for err in errs {
            match err.into_kind() {
                ErrorKind::UnsupportedMutation { .. } => {}
                kind => panic!("unexpected error kind: {:?}", kind),
            }
        }
        assert_eq!(r, vec!["a", "b"]);
    }

    #[test]
    fn blank_fields_are_absent() {
        let r = rec(&["", "   ", "\t"]);
        assert_eq!(r.get_int(0).unwrap(), None);
        assert_eq!(r.get_int(1).unwrap(), None);
        assert_eq!(r.get_long(2).unwrap(), None);
        assert_eq!(r.get_int(9).unwrap(), None);
        assert_eq!(r.get_int_or(0, 5).unwrap(), 5);
        assert_eq!(r.get_int_or(1, 6).unwrap(), 6);
        assert_eq!(r.get_double_or(9, 2.5).unwrap(), 2.5);
        assert_eq!(r.get_bool_or(1, true).unwrap(), true);
    }

    #[test]
    fn typed_getters_trim_and_parse() {
        let r = rec(&[" 12 ", "-9000000000", "3.25", "0.1", "true", "false"]);
        assert_eq!(r.get_int(0).unwrap(), Some(12));
        assert_eq!(r.get_long(1).unwrap(), Some(-9_000_000_000));
        assert_eq!(r.get_double(2).unwrap(), Some(3.25));
        assert_eq!(
            r.get_decimal(3).unwrap(),
            Some(BigDecimal::from_str("0.1").unwrap())
        );
        assert_eq!(r.get_bool(4).unwrap(), Some(true));
        assert_eq!(r.get_bool(5).unwrap(), Some(false));
        assert_eq!(r.parse::<u16>(0).unwrap(), Some(12));
    }

    #[test]
    fn malformed_numbers_fail() {
        let r = rec(&["12a", "yes"]);
        match r.get_int_or(0, 1).unwrap_err().into_kind() {
            ErrorKind::Parse { column, value, ty, .. } => {
                assert_eq!(column, 0);
                assert_eq!(value, "12a");
                assert_eq!(ty, "i32");
            }
            kind => panic!("unexpected error kind: {:?}", kind),
        }
        assert!(r.get_double(0).is_err());
        assert!(r.get_decimal(0).is_err());
        // An int field does not fit into a narrower integer.
        let r = rec(&["3000000000"]);
        assert!(r.get_int(0).is_err());
        assert_eq!(r.get_long(0).unwrap(), Some(3_000_000_000));
    }

    #[test]
    fn bools_never_fail() {
        let r = rec(&["TRUE", " true ", "yes", "1", "False", " "]);
        assert_eq!(r.get_bool(0).unwrap(), Some(true));
        assert_eq!(r.get_bool(1).unwrap(), Some(true));
        assert_eq!(r.get_bool(2).unwrap(), Some(false));
        assert_eq!(r.get_bool(3).unwrap(), Some(false));
        assert_eq!(r.get_bool(4).unwrap(), Some(false));
        assert_eq!(r.get_bool(5).unwrap(), None);
        assert_eq!(r.get_bool_or(5, true).unwrap(), true);
        assert_eq!(r.get_bool_or(9, true).unwrap(), true);

        let r = r.with_headers(headers(&["a", "b", "c"]));
        assert_eq!(r.get_bool_by_name("c").unwrap(), Some(false));
        assert!(r.get_bool_by_name("nope").is_err());
    }

    #[test]
    fn decimals_keep_full_precision() {
        let big = "123456789012345678901234567890.5";
        let long = "0.12345678901234567890123456789012";
        let r = rec(&[big, long]);
        let d = r.get_decimal(0).unwrap().unwrap();
        assert_eq!(d, BigDecimal::from_str(big).unwrap());
        assert_eq!(d.to_string(), big);
        let d = r.get_decimal(1).unwrap().unwrap();
        assert_eq!(d.to_string(), long);

        let mut out = Record::new();
        out.append(d).append(&BigDecimal::from_str(big).unwrap());
        assert_eq!(out, vec![long, big]);
    }

    #[test]
    fn access_by_name() {
        let r = rec(&["Boston", "1000", ""])
            .with_headers(headers(&["city", "pop", "area", "extra"]));
        assert_eq!(r.get_by_name("city").unwrap(), Some("Boston"));
        assert_eq!(r.get_int_by_name("pop").unwrap(), Some(1000));
        assert_eq!(r.get_double_by_name("area").unwrap(), None);
        assert_eq!(r.get_double_by_name_or("area", 1.5).unwrap(), 1.5);
        assert_eq!(r.get_by_name("extra").unwrap(), None);
        assert_eq!(r.get_by_name_or("extra", "n/a").unwrap(), "n/a");
        assert_eq!(r.column("pop").unwrap(), Some(1));
        assert_eq!(r.column("nope").unwrap(), None);
        assert!(r.get_int_by_name("nope").is_err());
    }

    #[test]
    fn access_by_name_without_headers() {
        let r = rec(&["1"]);
        match r.get_int_by_name("a").unwrap_err().into_kind() {
            ErrorKind::HeaderNotDefined => {}
            kind => panic!("unexpected error kind: {:?}", kind),
        }
        assert!(r.column("a").is_err());
        assert!(r.headers().is_none());
    }

    #[test]
    fn positional_strings() {
        let r = rec(&["a", ""]);
        assert_eq!(r.get(0), Some("a"));
        assert_eq!(r.get(1), Some(""));
        assert_eq!(r.get(2), None);
        assert_eq!(r.get_or(2, "d"), "d");
        assert_eq!(&r[0], "a");
        assert!(r.contains("a"));
        assert!(!r.contains("b"));
    }

    #[test]
    fn display_escapes_fields() {
        let r = rec(&["a,b", "c\"d", "e"]);
        assert_eq!(r.to_string(), "\"a,b\",\"c\"\"d\",e");

        let mut r = Record::with_dialect(Dialect::new(';', '\'', '\n'));
        r.append("a;b").append("it's");
        assert_eq!(r.to_string(), "'a;b';'it''s'");
    }

    #[test]
    fn parse_line_uses_dialect() {
        let d = Dialect::default().with_separator('|');
        let r = Record::parse_line(d, "a|\"b|c\"\nrest");
        assert_eq!(r, vec!["a", "b|c"]);
        assert_eq!(r.dialect(), d);
    }

    #[test]
    fn equality_ignores_headers() {
        let a = rec(&["x", "y"]);
        let b = rec(&["x", "y"]).with_headers(headers(&["p", "q"]));
        assert_eq!(a, b);
        assert_eq!(a, &["x", "y"][..]);
        assert!(a != vec!["x"]);
    }

    #[test]
    fn collect_and_iterate() {
        let r: Record = vec![1, 2, 3].into_iter().collect();
        assert_eq!(r.iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(r.iter().rev().next(), Some("3"));
        let mut r = r;
        r.extend(vec!["4"]);
        assert_eq!(r.into_fields(), vec!["1", "2", "3", "4"]);
    }
}
