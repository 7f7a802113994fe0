use std::collections::HashMap;
use std::ops;
use std::slice;

use crate::error::{new_error, ErrorKind, Result};

/// An immutable mapping from column names to column positions.
///
/// A header index is built once from an ordered list of names and then
/// shared, behind an `Arc`, by every [`Record`](struct.Record.html) that
/// came from the same reader or writer.
///
/// When a name occurs more than once, it resolves to its *last* position.
///
/// # Example
///
/// ```
/// use powercsv::HeaderIndex;
///
/// let headers = HeaderIndex::new(&["a", "b", "a"]);
/// assert_eq!(headers.len(), 3);
/// assert_eq!(headers.lookup("a"), Some(2));
/// assert_eq!(headers.lookup("b"), Some(1));
/// assert_eq!(headers.lookup("c"), None);
/// assert_eq!(headers.name(0), Some("a"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeaderIndex {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Build a header index from an ordered list of column names.
    pub fn new<I, T>(names: I) -> HeaderIndex
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let names: Vec<String> =
            names.into_iter().map(|name| name.as_ref().to_string()).collect();
        let mut indices = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            // Later duplicates shadow earlier ones.
            indices.insert(name.clone(), i);
        }
        HeaderIndex { names, indices }
    }

    /// Return the position of the column with the given name.
    ///
    /// If no such column exists, this returns `None`.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.indices.get(name).cloned()
    }

    /// Return the position of the column with the given name.
    ///
    /// If no such column exists, this returns a `ColumnNotExist` error.
    pub fn resolve(&self, name: &str) -> Result<usize> {
        match self.lookup(name) {
            Some(i) => Ok(i),
            None => Err(new_error(ErrorKind::ColumnNotExist {
                name: name.to_string(),
            })),
        }
    }

    /// Return the name of the column at position `i`.
    ///
    /// If `i` is past the last column, this returns `None`.
    pub fn name(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(|name| &**name)
    }

    /// All column names, in their original order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of columns, counting duplicates.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns an iterator over all column names, in their original order.
    pub fn iter(&self) -> HeaderIter {
        HeaderIter(self.names.iter())
    }
}

impl ops::Index<usize> for HeaderIndex {
    type Output = str;
    fn index(&self, i: usize) -> &str {
        &self.names[i]
    }
}

impl<'a> IntoIterator for &'a HeaderIndex {
    type IntoIter = HeaderIter<'a>;
    type Item = &'a str;

    fn into_iter(self) -> HeaderIter<'a> {
        self.iter()
    }
}

/// An iterator over the column names of a header index.
#[derive(Clone, Debug)]
pub struct HeaderIter<'a>(slice::Iter<'a, String>);

impl<'a> Iterator for HeaderIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.0.next().map(|name| &**name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for HeaderIter<'a> {}
