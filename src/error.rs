use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::result;

/// A type alias for `Result<T, powercsv::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur when processing CSV data.
///
/// This error can happen when reading or writing CSV data, and when
/// accessing the fields of a [`Record`](struct.Record.html).
///
/// Malformed quoting is never an error. The parser always finds *a* parse,
/// even if it is not the one the author of the data intended.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

/// Create a new error with the given kind.
pub(crate) fn new_error(kind: ErrorKind) -> Error {
    Error(Box::new(kind))
}

impl Error {
    /// Return the specific type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Unwrap this error into its underlying type.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns true if this is an I/O error.
    ///
    /// If this is true, the underlying `ErrorKind` is guaranteed to be
    /// `ErrorKind::Io`.
    pub fn is_io_error(&self) -> bool {
        match *self.0 {
            ErrorKind::Io(_) => true,
            _ => false,
        }
    }
}

/// The specific type of an error.
#[derive(Debug)]
pub enum ErrorKind {
    /// An I/O error that occurred while reading from the underlying source
    /// or writing to the underlying sink.
    Io(io::Error),
    /// A column was addressed by name, but no header is bound to the record.
    HeaderNotDefined,
    /// A column was addressed by name, but the bound header has no column
    /// with that name.
    ColumnNotExist {
        /// The name that failed to resolve.
        name: String,
    },
    /// An operation that would remove fields from a record was attempted.
    ///
    /// Records only support appending and overwriting fields.
    UnsupportedMutation {
        /// The name of the refused operation.
        op: &'static str,
    },
    /// A non-blank field could not be parsed into the requested type.
    Parse {
        /// The position of the field in its record.
        column: usize,
        /// The trimmed text that failed to parse.
        value: String,
        /// The name of the requested type.
        ty: &'static str,
        /// The underlying parse error.
        err: Box<dyn StdError + Send + Sync>,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        new_error(ErrorKind::Io(err))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self.0 {
            ErrorKind::Io(ref err) => Some(err),
            ErrorKind::Parse { ref err, .. } => Some(&**err),
            ErrorKind::HeaderNotDefined
            | ErrorKind::ColumnNotExist { .. }
            | ErrorKind::UnsupportedMutation { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Io(ref err) => write!(f, "{}", err),
            ErrorKind::HeaderNotDefined => write!(
                f,
                "CSV error: column accessed by name, \
                 but no header is defined for this record"
            ),
            ErrorKind::ColumnNotExist { ref name } => {
                write!(f, "CSV error: column '{}' does not exist", name)
            }
            ErrorKind::UnsupportedMutation { op } => write!(
                f,
                "CSV error: '{}' is not supported, \
                 fields can only be appended or overwritten",
                op
            ),
            ErrorKind::Parse { column, ref value, ty, ref err } => write!(
                f,
                "CSV parse error: field {}: could not parse '{}' as {}: {}",
                column, value, ty, err
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;
    use std::io;

    use super::{new_error, Error, ErrorKind};

    #[test]
    fn io_errors_convert() {
        let err = Error::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(err.is_io_error());
        assert_eq!(err.to_string(), "boom");
        assert!(err.source().is_some());
        match err.into_kind() {
            ErrorKind::Io(err) => assert_eq!(err.kind(), io::ErrorKind::Other),
            kind => panic!("unexpected error kind: {:?}", kind),
        }
    }

    #[test]
    fn display_messages() {
        let err = new_error(ErrorKind::ColumnNotExist { name: "age".into() });
        assert_eq!(err.to_string(), "CSV error: column 'age' does not exist");
        assert!(!err.is_io_error());
        assert!(err.source().is_none());

        let err = new_error(ErrorKind::UnsupportedMutation { op: "clear" });
        assert!(err.to_string().contains("'clear' is not supported"));

        let parse_err = "x".parse::<i32>().unwrap_err();
        let err = new_error(ErrorKind::Parse {
            column: 2,
            value: "x".into(),
            ty: "i32",
            err: Box::new(parse_err),
        });
        assert!(err
            .to_string()
            .starts_with("CSV parse error: field 2: could not parse 'x' as i32"));
        assert!(err.source().is_some());
    }

    #[test]
    fn into_io_error() {
        let err = new_error(ErrorKind::HeaderNotDefined);
        let ioerr: io::Error = err.into();
        assert_eq!(ioerr.kind(), io::ErrorKind::Other);
    }
}
