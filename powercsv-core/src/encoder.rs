use std::borrow::Cow;

use memchr::{memchr3, memchr_iter};

use crate::dialect::Dialect;

/// Escapes fields and joins them into a single line of text.
///
/// A field is quoted when it contains the separator, the line terminator or
/// the quote character. Quoting wraps the whole field in quote characters
/// and doubles every quote character inside it. Any other field is written
/// unchanged.
///
/// The encoder never writes a line terminator. That is left to the caller.
///
/// Note that the parser does not treat every doubled quote as a literal
/// quote (see [`LineParser`](struct.LineParser.html)), so `encode` and
/// `parse` are only inverses for fields that contain no quote characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    dialect: Dialect,
}

impl Encoder {
    /// Create a new encoder for the given dialect.
    pub fn new(dialect: Dialect) -> Encoder {
        Encoder { dialect }
    }

    /// The dialect used by this encoder.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns true if and only if the given field must be quoted.
    pub fn needs_quotes(&self, field: &str) -> bool {
        match self.dialect.ascii() {
            // ASCII bytes never occur inside a multi-byte UTF-8 sequence,
            // so a byte search is exact here.
            Some((sep, quote, term)) => {
                memchr3(sep, quote, term, field.as_bytes()).is_some()
            }
            None => {
                let d = self.dialect;
                field.chars().any(|c| {
                    c == d.separator() || c == d.quote() || c == d.terminator()
                })
            }
        }
    }

    /// Escape a single field.
    ///
    /// Fields that need no quoting are returned as is, without allocating.
    pub fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        if !self.needs_quotes(field) {
            return Cow::Borrowed(field);
        }
        let mut buf = String::with_capacity(field.len() + 2);
        self.quote_field(field, &mut buf);
        Cow::Owned(buf)
    }

    /// Escape a field that may be absent. An absent field is written as the
    /// empty string.
    pub fn escape_opt<'a>(&self, field: Option<&'a str>) -> Cow<'a, str> {
        match field {
            None => Cow::Borrowed(""),
            Some(field) => self.escape(field),
        }
    }

    /// Escape each field and join them with the separator into `out`.
    ///
    /// No line terminator is written.
    pub fn encode_into<I, T>(&self, fields: I, out: &mut String)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                out.push(self.dialect.separator());
            }
            let field = field.as_ref();
            if self.needs_quotes(field) {
                self.quote_field(field, out);
            } else {
                out.push_str(field);
            }
        }
    }

    /// Escape each field and join them with the separator.
    ///
    /// No line terminator is written.
    pub fn encode_line<I, T>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut out = String::new();
        self.encode_into(fields, &mut out);
        out
    }

    /// Write `field` wrapped in quotes, doubling every quote inside it.
    fn quote_field(&self, field: &str, out: &mut String) {
        let quote = self.dialect.quote();
        out.push(quote);
        if quote.is_ascii() {
            let mut last = 0;
            for i in memchr_iter(quote as u8, field.as_bytes()) {
                // Both `last` and `i` sit on ASCII bytes, and therefore on
                // char boundaries.
                out.push_str(&field[last..i]);
                out.push(quote);
                out.push(quote);
                last = i + 1;
            }
            out.push_str(&field[last..]);
        } else {
            for c in field.chars() {
                if c == quote {
                    out.push(quote);
                }
                out.push(c);
            }
        }
        out.push(quote);
    }
}

#[cfg(test)]
mod tests {
    use super::Encoder;
    use crate::dialect::Dialect;
    use crate::parser::LineParser;

    macro_rules! writes_as {
        ($name:ident, $fields:expr, $expected:expr) => {
            writes_as!($name, $fields, $expected, Dialect::default());
        };
        ($name:ident, $fields:expr, $expected:expr, $dialect:expr) => {
            #[test]
            fn $name() {
                let enc = Encoder::new($dialect);
                let fields: Vec<&str> = $fields;
                assert_eq!($expected, enc.encode_line(&fields));
            }
        };
    }

    writes_as!(one_field, vec!["a"], "a");
    writes_as!(many_fields, vec!["a", "b", "c"], "a,b,c");
    writes_as!(empty_fields, vec!["", "", ""], ",,");
    writes_as!(single_empty_field, vec![""], "");
    writes_as!(no_fields, vec![], "");
    writes_as!(quote_separator, vec!["a,b", "c"], "\"a,b\",c");
    writes_as!(quote_terminator, vec!["a\nb"], "\"a\nb\"");
    writes_as!(quote_quote, vec!["a\"b"], "\"a\"\"b\"");
    writes_as!(quote_lone_quote, vec!["\""], "\"\"\"\"");
    writes_as!(no_quote_cr, vec!["a\rb"], "a\rb");
    writes_as!(no_quote_space, vec![" a "], " a ");
    writes_as!(
        quote_custom,
        vec!["it's", "a;b"],
        "'it''s';'a;b'",
        Dialect::new(';', '\'', '\n')
    );
    writes_as!(
        terminator_custom,
        vec!["a\nb", "c|d"],
        "a\nb,\"c|d\"",
        Dialect::default().with_terminator('|')
    );
    writes_as!(
        quote_non_ascii,
        vec!["a«b", "c"],
        "«a««b«,c",
        Dialect::default().with_quote('«')
    );
    writes_as!(
        separator_non_ascii,
        vec!["é§ü", "x"],
        "\"é§ü\"§x",
        Dialect::default().with_separator('§')
    );

    #[test]
    fn escape_borrows_when_unquoted() {
        let enc = Encoder::default();
        assert!(matches!(enc.escape("plain"), std::borrow::Cow::Borrowed(_)));
        assert_eq!(enc.escape("a,b"), "\"a,b\"");
        assert_eq!(enc.escape_opt(None), "");
        assert_eq!(enc.escape_opt(Some("x\"")), "\"x\"\"\"");
    }

    #[test]
    fn quote_free_fields_round_trip() {
        let d = Dialect::default();
        let enc = Encoder::new(d);
        let fields = vec!["a,b", "", "c\nd", "e f"];
        let line = format!("{}\n", enc.encode_line(&fields));
        assert_eq!(LineParser::parse(d, &line), fields);
    }

    // Escaping doubles quotes, but parsing only keeps a doubled quote when
    // the field already has content before it. These pin that asymmetry.
    #[test]
    fn quoted_fields_are_not_round_trip_safe() {
        let d = Dialect::default();
        let enc = Encoder::new(d);
        let line = enc.encode_line(&["\"a"]);
        assert_eq!(line, "\"\"\"a\"");
        assert_eq!(LineParser::parse(d, &line), vec!["a"]);

        let line = enc.encode_line(&["a\"b"]);
        assert_eq!(LineParser::parse(d, &line), vec!["a\"b"]);
    }
}
