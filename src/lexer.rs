//! # Annotation Lexer
//!
//! Splits annotated song text into a flat stream of literal text and chord
//! annotations. Both transposition and layout walk this stream instead of
//! re-scanning strings.
//!
//! ## Rules
//! - An annotation opens at `[` and closes at the next `]`; they never nest.
//! - The enclosed text must be non-empty. `[]` is literal text.
//! - A `[` with no `]` after it is literal text, as is everything after it.
//! - Adjacent literal characters are always merged into one token, so a
//!   stream never holds two `Literal`s in a row.
//!
//! ```text
//! "[G]Hello [D/F#]world"
//!   -> Chord("G") Literal("Hello ") Chord("D/F#") Literal("world")
//! ```

/// A slice of annotated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain characters, copied through untouched.
    Literal(&'a str),
    /// Inner text of a `[...]` annotation, without the brackets.
    Chord(&'a str),
}

impl<'a> Token<'a> {
    pub fn chord(&self) -> Option<&'a str> {
        match *self {
            Token::Chord(text) => Some(text),
            Token::Literal(_) => None,
        }
    }

    /// True for a literal made only of whitespace (or empty).
    pub fn is_blank_literal(&self) -> bool {
        matches!(self, Token::Literal(text) if text.trim().is_empty())
    }
}

/// Iterator over the tokens of an annotated string.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Collect every token in the input.
    pub fn tokenize(self) -> Vec<Token<'a>> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.position..];
        if rest.is_empty() {
            return None;
        }

        match find_annotation(rest) {
            Some((open, _)) if open > 0 => {
                self.position += open;
                Some(Token::Literal(&rest[..open]))
            }
            Some((_, close)) => {
                self.position += close + 1;
                Some(Token::Chord(&rest[1..close]))
            }
            None => {
                self.position = self.input.len();
                Some(Token::Literal(rest))
            }
        }
    }
}

/// Byte offsets of the first `[` and its matching `]` for a non-empty annotation.
fn find_annotation(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(found) = text[from..].find('[') {
        let open = from + found;
        let close = open + 1 + text[open + 1..].find(']')?;
        if close > open + 1 {
            return Some((open, close));
        }
        from = open + 1;
    }
    None
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).tokenize()
}

/// Whether the text holds at least one chord annotation.
pub fn has_annotation(input: &str) -> bool {
    find_annotation(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_line() {
        let tokens = tokenize("[G]Hello [D/F#]world");
        assert_eq!(
            tokens,
            vec![
                Token::Chord("G"),
                Token::Literal("Hello "),
                Token::Chord("D/F#"),
                Token::Literal("world"),
            ]
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(tokenize("just words"), vec![Token::Literal("just words")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_adjacent_chords() {
        assert_eq!(
            tokenize("[C][G]"),
            vec![Token::Chord("C"), Token::Chord("G")]
        );
    }

    #[test]
    fn test_empty_brackets_are_literal() {
        assert_eq!(
            tokenize("a[]b[C]"),
            vec![Token::Literal("a[]b"), Token::Chord("C")]
        );
        assert!(!has_annotation("[]"));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        assert_eq!(
            tokenize("[C]la [G la"),
            vec![Token::Chord("C"), Token::Literal("la [G la")]
        );
    }

    #[test]
    fn test_non_greedy_close() {
        // The first `]` closes, the stray one stays literal
        assert_eq!(
            tokenize("[Am]]x"),
            vec![Token::Chord("Am"), Token::Literal("]x")]
        );
        // Leftmost `[` wins, so the inner text keeps the second bracket
        assert_eq!(tokenize("[[C]"), vec![Token::Chord("[C")]);
    }

    #[test]
    fn test_multibyte_literals() {
        let tokens = tokenize("[D]Canción [A]ñandú");
        assert_eq!(tokens[1], Token::Literal("Canción "));
        assert_eq!(tokens[3], Token::Literal("ñandú"));
    }

    #[test]
    fn test_token_helpers() {
        assert_eq!(Token::Chord("Em").chord(), Some("Em"));
        assert_eq!(Token::Literal("x").chord(), None);
        assert!(Token::Literal("  ").is_blank_literal());
        assert!(!Token::Literal(" a ").is_blank_literal());
        assert!(!Token::Chord(" ").is_blank_literal());
    }
}
