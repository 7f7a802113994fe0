use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::header::HeaderIndex;
use crate::record::Record;

fn serialize_strs<'a, S, I>(
    serializer: S,
    len: usize,
    items: I,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    I: Iterator<Item = &'a str>,
{
    let mut seq = serializer.serialize_seq(Some(len))?;
    for item in items {
        seq.serialize_element(item)?;
    }
    seq.end()
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_strs(serializer, self.len(), self.iter())
    }
}

impl Serialize for HeaderIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_strs(serializer, self.len(), self.iter())
    }
}
