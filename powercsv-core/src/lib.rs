/*!
`powercsv-core` provides the character level machinery for reading and
writing delimiter separated text: a line parser that is fed one `char` at a
time, and an encoder that escapes fields and joins them into a line.

Neither type performs any I/O. Callers supply characters to the
[`LineParser`](struct.LineParser.html) from wherever they come from and
decide what to do with the text produced by the
[`Encoder`](struct.Encoder.html). The `powercsv` crate builds streaming
readers and writers on top of these.

# Example

```
use powercsv_core::{Dialect, Encoder, LineParser};

let mut parser = LineParser::new(Dialect::default());
let mut done = false;
for c in "\"a,b\",c\n".chars() {
    done = parser.consume(c);
}
assert!(done);
assert_eq!(parser.finish(), vec!["a,b", "c"]);

let enc = Encoder::new(Dialect::default());
assert_eq!(enc.encode_line(&["a,b", "c"]), "\"a,b\",c");
```
*/

#![deny(missing_docs)]

pub use crate::dialect::Dialect;
pub use crate::encoder::Encoder;
pub use crate::parser::LineParser;

mod dialect;
mod encoder;
mod parser;
