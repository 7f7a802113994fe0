//! Serde support for records and headers.
//!
//! A [`Record`](../struct.Record.html) serializes as a sequence of its
//! fields and a [`HeaderIndex`](../struct.HeaderIndex.html) as a sequence of
//! its column names. Both deserialize from a sequence of strings. Headers,
//! dialect and position of a record are not part of its serialized form.

mod de;
mod ser;
