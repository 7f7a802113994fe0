/// The three characters that govern field and line boundaries.
///
/// A dialect is a small `Copy` value shared by the parser, the encoder and
/// every record that needs to render itself as text. The default dialect
/// uses `,` as the separator, `"` as the quote and `\n` as the line
/// terminator.
///
/// A carriage return is never configurable. It is always dropped when it
/// appears outside of a quoted span and kept verbatim inside one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Dialect {
    separator: char,
    quote: char,
    terminator: char,
}

impl Default for Dialect {
    fn default() -> Dialect {
        Dialect { separator: ',', quote: '"', terminator: '\n' }
    }
}

impl Dialect {
    /// Create a dialect from a separator, a quote and a line terminator.
    pub fn new(separator: char, quote: char, terminator: char) -> Dialect {
        Dialect { separator, quote, terminator }
    }

    /// The field separator. The default is `,`.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// The quote character. The default is `"`.
    pub fn quote(&self) -> char {
        self.quote
    }

    /// The line terminator. The default is `\n`.
    pub fn terminator(&self) -> char {
        self.terminator
    }

    /// Return a copy of this dialect with a different separator.
    pub fn with_separator(self, separator: char) -> Dialect {
        Dialect { separator, ..self }
    }

    /// Return a copy of this dialect with a different quote character.
    pub fn with_quote(self, quote: char) -> Dialect {
        Dialect { quote, ..self }
    }

    /// Return a copy of this dialect with a different line terminator.
    pub fn with_terminator(self, terminator: char) -> Dialect {
        Dialect { terminator, ..self }
    }

    /// Returns the three special characters as ASCII bytes, if every one
    /// of them is ASCII.
    pub(crate) fn ascii(&self) -> Option<(u8, u8, u8)> {
        if self.separator.is_ascii()
            && self.quote.is_ascii()
            && self.terminator.is_ascii()
        {
            Some((
                self.separator as u8,
                self.quote as u8,
                self.terminator as u8,
            ))
        } else {
            None
        }
    }
}
