use std::mem;

use crate::dialect::Dialect;

/// The two states of the line parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// Outside of a quoted span.
    Normal,
    /// Inside a quoted span. Separators, terminators and carriage returns
    /// are all data here.
    InQuote,
}

/// A push based parser for a single logical line.
///
/// Characters are fed one at a time with [`consume`](#method.consume). When
/// it returns `true`, a line terminator outside of a quoted span has just
/// been seen and the fields of that line can be taken with
/// [`finish`](#method.finish), which also readies the parser for the next
/// line.
///
/// # Quoting
///
/// This parser is permissive. It never reports an error and always finds
/// *a* parse. The rules are:
///
/// * Inside quotes, a quote character closes the quoted span and is
///   dropped. Everything else, including `\r`, is kept verbatim.
/// * Outside quotes, a quote character opens a quoted span. If the current
///   field already has content, the quote itself is kept as data.
/// * Outside quotes, the separator ends a field, the terminator ends a
///   field and the line, `\r` is dropped and everything else is data.
///
/// A consequence is that a doubled quote only produces a literal quote when
/// the field already has content in front of it:
///
/// ```
/// use powercsv_core::{Dialect, LineParser};
///
/// let d = Dialect::default();
/// assert_eq!(LineParser::parse(d, r#""a""b""#), vec![r#"a"b"#]);
/// // The output of escaping a lone `"` does not survive a round trip.
/// assert_eq!(LineParser::parse(d, r#""""""#), vec![""]);
/// ```
#[derive(Clone, Debug)]
pub struct LineParser {
    dialect: Dialect,
    state: State,
    /// The field currently being built.
    field: String,
    /// Completed fields of the current line.
    fields: Vec<String>,
    /// Whether any character has been consumed since the last `finish`.
    started: bool,
}

impl LineParser {
    /// Create a new line parser for the given dialect.
    pub fn new(dialect: Dialect) -> LineParser {
        LineParser {
            dialect,
            state: State::Normal,
            field: String::new(),
            fields: vec![],
            started: false,
        }
    }

    /// Parse a single line of text.
    ///
    /// Parsing stops at the first line terminator found outside of quotes.
    /// Anything after it is ignored. If no terminator is found, the text is
    /// treated as one complete, unterminated line.
    pub fn parse(dialect: Dialect, line: &str) -> Vec<String> {
        let mut parser = LineParser::new(dialect);
        for c in line.chars() {
            if parser.consume(c) {
                return parser.finish();
            }
        }
        parser.complete_line();
        parser.finish()
    }

    /// The dialect used by this parser.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Feed one character to the parser.
    ///
    /// Returns `true` exactly when this character completed a line.
    #[inline]
    pub fn consume(&mut self, c: char) -> bool {
        self.started = true;
        match self.state {
            State::InQuote => {
                if c == self.dialect.quote() {
                    self.state = State::Normal;
                } else {
                    self.field.push(c);
                }
            }
            State::Normal => {
                if c == self.dialect.quote() {
                    if !self.field.is_empty() {
                        self.field.push(c);
                    }
                    self.state = State::InQuote;
                } else if c == self.dialect.separator() {
                    self.complete_field();
                } else if c == self.dialect.terminator() {
                    self.complete_field();
                    return true;
                } else if c != '\r' {
                    self.field.push(c);
                }
            }
        }
        false
    }

    /// Push the pending field as the last field of the current line.
    ///
    /// This is how a line that ends without a terminator (for example, at
    /// the end of a stream) is closed. The quote state is left alone; it is
    /// reset by `finish`.
    pub fn complete_line(&mut self) {
        self.complete_field();
    }

    /// Take the fields of the current line and reset the parser.
    ///
    /// Any field still being built is discarded, so callers closing an
    /// unterminated line should call `complete_line` first.
    pub fn finish(&mut self) -> Vec<String> {
        self.state = State::Normal;
        self.started = false;
        self.field.clear();
        mem::replace(&mut self.fields, vec![])
    }

    /// The fields completed so far on the current line.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns true if at least one character has been consumed since the
    /// parser was created or last finished.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Returns true if the parser is inside a quoted span.
    pub fn in_quote(&self) -> bool {
        self.state == State::InQuote
    }

    fn complete_field(&mut self) {
        let field = mem::replace(&mut self.field, String::new());
        self.fields.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::LineParser;
    use crate::dialect::Dialect;

    type Csv = Vec<Vec<String>>;

    /// Parse every line in `data`, closing a trailing unterminated line the
    /// way a streaming reader does at the end of its input.
    fn parse_all(dialect: Dialect, data: &str) -> Csv {
        let mut parser = LineParser::new(dialect);
        let mut csv = vec![];
        for c in data.chars() {
            if parser.consume(c) {
                csv.push(parser.finish());
            }
        }
        if parser.is_started() {
            parser.complete_line();
            csv.push(parser.finish());
        }
        csv
    }

    macro_rules! csv {
        ($([$($field:expr),*]),*) => {{
            #[allow(unused_mut)]
            let mut csv: Csv = vec![];
            $(
                #[allow(unused_mut)]
                let mut row: Vec<String> = vec![];
                $(
                    row.push($field.to_string());
                )*
                csv.push(row);
            )*
            csv
        }}
    }

    macro_rules! parses_to {
        ($name:ident, $data:expr, $expected:expr) => {
            parses_to!($name, $data, $expected, Dialect::default());
        };
        ($name:ident, $data:expr, $expected:expr, $dialect:expr) => {
            #[test]
            fn $name() {
                let got = parse_all($dialect, $data);
                assert_eq!($expected, got);
            }
        };
    }

    parses_to!(one_row_one_field, "a", csv![["a"]]);
    parses_to!(one_row_many_fields, "a,b,c", csv![["a", "b", "c"]]);
    parses_to!(one_row_trailing_comma, "a,b,", csv![["a", "b", ""]]);
    parses_to!(one_row_one_field_lf, "a\n", csv![["a"]]);
    parses_to!(one_row_many_fields_lf, "a,b,c\n", csv![["a", "b", "c"]]);
    parses_to!(one_row_trailing_comma_lf, "a,b,\n", csv![["a", "b", ""]]);
    parses_to!(one_row_one_field_crlf, "a\r\n", csv![["a"]]);
    parses_to!(one_row_many_fields_crlf, "a,b,c\r\n", csv![["a", "b", "c"]]);

    parses_to!(many_rows_one_field, "a\nb", csv![["a"], ["b"]]);
    parses_to!(
        many_rows_many_fields,
        "a,b,c\nx,y,z\n",
        csv![["a", "b", "c"], ["x", "y", "z"]]
    );
    parses_to!(
        many_rows_crlf,
        "a,b\r\nx,y\r\n",
        csv![["a", "b"], ["x", "y"]]
    );

    parses_to!(empty, "", csv![]);
    parses_to!(empty_lines, "\n\n", csv![[""], [""]]);
    parses_to!(lone_cr, "\r", csv![[""]]);
    parses_to!(cr_inside_field_dropped, "a\rb", csv![["ab"]]);

    parses_to!(quote_empty, "\"\"", csv![[""]]);
    parses_to!(quote_lf, "\"\"\n", csv![[""]]);
    parses_to!(quote_space, "\" \"", csv![[" "]]);
    parses_to!(quote_separator, "\"a,b\",c\n", csv![["a,b", "c"]]);
    parses_to!(quote_terminator, "\"a\nb\",c\n", csv![["a\nb", "c"]]);
    parses_to!(quote_keeps_cr, "\"a\r\nb\"\n", csv![["a\r\nb"]]);
    parses_to!(quote_mid_token, "ab\"c,d\"", csv![["ab\"c,d"]]);
    parses_to!(quote_outer_space, " \"a\" ", csv![[" \"a "]]);
    parses_to!(quote_unclosed, "\"a,b\nc", csv![["a,b\nc"]]);

    // A doubled quote is a literal quote only when the field already has
    // content at the point where the quoted span reopens.
    parses_to!(doubled_quote_after_content, "\"a\"\"b\"", csv![["a\"b"]]);
    parses_to!(doubled_quote_at_start_dropped, "\"\"\"a\"", csv![["a"]]);
    parses_to!(doubled_quote_alone_dropped, "\"\"\"\"", csv![[""]]);
    parses_to!(
        doubled_quote_trailing,
        "\"a\"\"\",x",
        csv![["a\"", "x"]]
    );

    parses_to!(
        separator_tab,
        "a\tb\n",
        csv![["a", "b"]],
        Dialect::default().with_separator('\t')
    );
    parses_to!(
        quote_change,
        "'a,b',c\n",
        csv![["a,b", "c"]],
        Dialect::default().with_quote('\'')
    );
    parses_to!(
        terminator_weird,
        "a,bzc,dz",
        csv![["a", "b"], ["c", "d"]],
        Dialect::default().with_terminator('z')
    );
    parses_to!(
        terminator_custom_keeps_lf,
        "a\nb;c",
        csv![["a\nb"], ["c"]],
        Dialect::default().with_terminator(';')
    );
    parses_to!(
        separator_non_ascii,
        "α§β\n",
        csv![["α", "β"]],
        Dialect::default().with_separator('§')
    );

    #[test]
    fn consume_signals_line_end() {
        let mut p = LineParser::new(Dialect::default());
        assert!(!p.consume('a'));
        assert!(!p.consume(','));
        assert_eq!(p.fields(), &["a".to_string()][..]);
        assert!(!p.consume('"'));
        assert!(p.in_quote());
        assert!(!p.consume('\n'));
        assert!(!p.consume('"'));
        assert!(!p.in_quote());
        assert!(p.consume('\n'));
        assert_eq!(p.finish(), vec!["a", "\n"]);
        assert!(!p.is_started());
    }

    #[test]
    fn finish_resets_quote_state() {
        let mut p = LineParser::new(Dialect::default());
        p.consume('"');
        p.consume('x');
        p.complete_line();
        assert!(p.in_quote());
        assert_eq!(p.finish(), vec!["x"]);
        assert!(!p.in_quote());
        assert!(!p.consume('y'));
        assert!(p.consume('\n'));
        assert_eq!(p.finish(), vec!["y"]);
    }

    #[test]
    fn parse_stops_at_terminator() {
        let d = Dialect::default();
        assert_eq!(LineParser::parse(d, "\"a,b\",c\n"), vec!["a,b", "c"]);
        assert_eq!(LineParser::parse(d, "a\nb"), vec!["a"]);
        assert_eq!(LineParser::parse(d, "a,b"), vec!["a", "b"]);
        assert_eq!(LineParser::parse(d, ""), vec![""]);
    }
}
