use std::fmt;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};

use crate::header::HeaderIndex;
use crate::record::Record;

/// Collects a sequence of strings.
struct StringsVisitor;

impl<'de> Visitor<'de> for StringsVisitor {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a sequence of strings")
    }

    fn visit_seq<A: SeqAccess<'de>>(
        self,
        mut seq: A,
    ) -> Result<Vec<String>, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(s) = seq.next_element::<String>()? {
            out.push(s);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Record, D::Error> {
        d.deserialize_seq(StringsVisitor).map(Record::from_fields)
    }
}

impl<'de> Deserialize<'de> for HeaderIndex {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<HeaderIndex, D::Error> {
        d.deserialize_seq(StringsVisitor).map(HeaderIndex::new)
    }
}
