//! # Layout Renderer
//!
//! Turns (already transposed) annotated text into display rows for a
//! fixed-width font, one row per source line.
//!
//! ## Row Kinds
//! ```text
//! ""                        -> Blank
//! "Chorus:"                 -> PlainLine      "Chorus:"
//! "[Am] [F] [C]"            -> ChordsOnlyLine "Am    F    C"
//! "[G]Hello [D]world"       -> ChordLyricPair "G     D"
//!                                             "Hello world"
//! ```
//!
//! ## Column Math
//! Each chord is placed at the column where its lyric segment starts, or
//! right after the previous chord when the lyrics are shorter. A chord that
//! ends the line, or that sits between two whitespace-only segments, gets
//! extra padding so it does not read as belonging to the next word.
//! Widths count `char`s, so accented lyrics line up.
//!
//! ## Book Mode
//! Rows longer than the threshold (10 by default) are split in two halves
//! for side-by-side display, the left half taking the extra row.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChordSheetError;
use crate::lexer::{tokenize, Token};

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderRow {
    Blank,
    PlainLine { text: String },
    ChordsOnlyLine { chords: String },
    ChordLyricPair { chords: String, lyrics: String },
}

/// Layout tunables. `RenderOptions::default()` gives the standard layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RenderOptions {
    /// Joins chords on lines without lyrics.
    pub chords_only_separator: String,
    /// Extra spaces before a chord that ends a line or floats between spaces.
    pub floating_chord_padding: usize,
    /// Row count above which book mode uses two columns.
    pub book_mode_threshold: usize,
    /// Spaces between the two columns in text output.
    pub column_gap: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chords_only_separator: "    ".to_string(),
            floating_chord_padding: 2,
            book_mode_threshold: 10,
            column_gap: 4,
        }
    }
}

impl RenderOptions {
    /// Parse options from YAML. Missing keys keep their defaults.
    ///
    /// ```
    /// use chordsheet::RenderOptions;
    ///
    /// let options = RenderOptions::from_yaml_str("book-mode-threshold: 20").unwrap();
    /// assert_eq!(options.book_mode_threshold, 20);
    /// assert_eq!(options.floating_chord_padding, 2);
    /// ```
    pub fn from_yaml_str(source: &str) -> Result<Self, ChordSheetError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| ChordSheetError::ConfigError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ChordSheetError> {
        let source = fs::read_to_string(path).map_err(|e| ChordSheetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&source)
    }
}

/// Render rows with the default options.
pub fn render_rows(content: &str) -> Vec<RenderRow> {
    render_rows_with(content, &RenderOptions::default())
}

pub fn render_rows_with(content: &str, options: &RenderOptions) -> Vec<RenderRow> {
    content.lines().map(|line| render_line(line, options)).collect()
}

fn render_line(line: &str, options: &RenderOptions) -> RenderRow {
    if line.trim().is_empty() {
        return RenderRow::Blank;
    }

    let tokens = tokenize(line);
    if tokens.iter().all(|t| t.chord().is_none()) {
        return RenderRow::PlainLine {
            text: line.to_string(),
        };
    }

    if !has_lyrics(&tokens) {
        let chords: Vec<&str> = tokens.iter().filter_map(|t| t.chord()).collect();
        return RenderRow::ChordsOnlyLine {
            chords: chords.join(&options.chords_only_separator),
        };
    }

    align(&tokens, options)
}

/// Whether any literal holds something other than whitespace or dashes.
fn has_lyrics(tokens: &[Token<'_>]) -> bool {
    tokens.iter().any(|token| match token {
        Token::Literal(text) => text.chars().any(|c| !is_separator(c)),
        Token::Chord(_) => false,
    })
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '\u{2013}' | '\u{2014}')
}

fn align(tokens: &[Token<'_>], options: &RenderOptions) -> RenderRow {
    let mut chords = String::new();
    let mut lyrics = String::new();
    let mut chords_width = 0usize;
    let mut lyrics_width = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        match *token {
            Token::Literal(text) => {
                lyrics.push_str(text);
                lyrics_width += text.chars().count();
            }
            Token::Chord(chord) => {
                let mut padding = lyrics_width.saturating_sub(chords_width);
                if is_floating(tokens, i) {
                    padding += options.floating_chord_padding;
                }
                chords.push_str(&" ".repeat(padding));
                chords.push_str(chord);
                chords_width += padding + chord.chars().count();
            }
        }
    }

    RenderRow::ChordLyricPair { chords, lyrics }
}

/// A chord that ends the line or sits between two whitespace-only literals.
fn is_floating(tokens: &[Token<'_>], index: usize) -> bool {
    if index + 1 == tokens.len() {
        return true;
    }
    index > 0 && tokens[index - 1].is_blank_literal() && tokens[index + 1].is_blank_literal()
}

/// Rows arranged for book mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookLayout<'a> {
    Single(&'a [RenderRow]),
    TwoColumn {
        left: &'a [RenderRow],
        right: &'a [RenderRow],
    },
}

impl BookLayout<'_> {
    pub fn column_count(&self) -> usize {
        match self {
            BookLayout::Single(_) => 1,
            BookLayout::TwoColumn { .. } => 2,
        }
    }
}

/// Split rows into two columns when there are more than ten.
///
/// # Examples
/// ```
/// use chordsheet::{paginate_book_mode, BookLayout, RenderRow};
///
/// let rows = vec![RenderRow::Blank; 11];
/// match paginate_book_mode(&rows) {
///     BookLayout::TwoColumn { left, right } => assert_eq!((left.len(), right.len()), (6, 5)),
///     BookLayout::Single(_) => unreachable!(),
/// }
/// ```
pub fn paginate_book_mode(rows: &[RenderRow]) -> BookLayout<'_> {
    paginate_book_mode_with(rows, &RenderOptions::default())
}

pub fn paginate_book_mode_with<'a>(
    rows: &'a [RenderRow],
    options: &RenderOptions,
) -> BookLayout<'a> {
    if rows.len() <= options.book_mode_threshold {
        return BookLayout::Single(rows);
    }
    let (left, right) = rows.split_at(rows.len().div_ceil(2));
    tracing::debug!(rows = rows.len(), left = left.len(), right = right.len(), "book mode split");
    BookLayout::TwoColumn { left, right }
}

/// Plain-text lines for a sequence of rows.
pub fn row_lines(rows: &[RenderRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            RenderRow::Blank => lines.push(String::new()),
            RenderRow::PlainLine { text } => lines.push(text.clone()),
            RenderRow::ChordsOnlyLine { chords } => lines.push(chords.clone()),
            RenderRow::ChordLyricPair { chords, lyrics } => {
                lines.push(chords.trim_end().to_string());
                lines.push(lyrics.clone());
            }
        }
    }
    lines
}

/// Rows as monospaced text, one line per row (two for chord/lyric pairs).
pub fn format_rows(rows: &[RenderRow]) -> String {
    row_lines(rows).join("\n")
}

/// Book layout as monospaced text, columns side by side.
pub fn format_book(layout: &BookLayout<'_>, options: &RenderOptions) -> String {
    let (left, right) = match *layout {
        BookLayout::Single(rows) => return format_rows(rows),
        BookLayout::TwoColumn { left, right } => (row_lines(left), row_lines(right)),
    };

    let width = left.iter().map(|l| l.chars().count()).max().unwrap_or(0) + options.column_gap;
    let height = left.len().max(right.len());
    let mut out = Vec::with_capacity(height);
    for i in 0..height {
        let l = left.get(i).map(String::as_str).unwrap_or("");
        let r = right.get(i).map(String::as_str).unwrap_or("");
        let pad = width - l.chars().count();
        let line = format!("{}{}{}", l, " ".repeat(pad), r);
        out.push(line.trim_end().to_string());
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(row: &RenderRow) -> (&str, &str) {
        match row {
            RenderRow::ChordLyricPair { chords, lyrics } => (chords.as_str(), lyrics.as_str()),
            other => panic!("expected a chord/lyric pair, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(render_rows("").is_empty());
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(render_rows("\n"), vec![RenderRow::Blank]);
        assert_eq!(
            render_rows("a\n\n   \nb"),
            vec![
                RenderRow::PlainLine { text: "a".to_string() },
                RenderRow::Blank,
                RenderRow::Blank,
                RenderRow::PlainLine { text: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_plain_lines_are_verbatim() {
        let rows = render_rows("{key: G}\n  Verse 1:  \n---");
        assert_eq!(rows[0], RenderRow::PlainLine { text: "{key: G}".to_string() });
        assert_eq!(rows[1], RenderRow::PlainLine { text: "  Verse 1:  ".to_string() });
        assert_eq!(rows[2], RenderRow::PlainLine { text: "---".to_string() });
    }

    #[test]
    fn test_chord_at_column_zero() {
        let rows = render_rows("[C]Hello");
        assert_eq!(rows.len(), 1);
        assert_eq!(pair(&rows[0]), ("C", "Hello"));
    }

    #[test]
    fn test_chords_only_line() {
        assert_eq!(
            render_rows("[Am] [F] [C]"),
            vec![RenderRow::ChordsOnlyLine { chords: "Am    F    C".to_string() }]
        );
        // Dashes and en/em dashes are separators, not lyrics
        assert_eq!(
            render_rows("[G] - [D] \u{2013} [Em] \u{2014}"),
            vec![RenderRow::ChordsOnlyLine { chords: "G    D    Em".to_string() }]
        );
    }

    #[test]
    fn test_chords_align_over_lyrics() {
        let rows = render_rows("[G]Hello [D]world");
        assert_eq!(pair(&rows[0]), ("G     D", "Hello world"));
    }

    #[test]
    fn test_chord_mid_word() {
        let rows = render_rows("A[Am]maz[F]ing");
        assert_eq!(pair(&rows[0]), (" Am F", "Amazing"));
    }

    #[test]
    fn test_crowded_chords_follow_each_other() {
        // Lyrics are shorter than the chord names, so chords butt together
        let rows = render_rows("[Cmaj7]a[G7sus4]b");
        assert_eq!(pair(&rows[0]), ("Cmaj7G7sus4", "ab"));
    }

    #[test]
    fn test_trailing_chord_is_padded() {
        let rows = render_rows("Hello [G]");
        assert_eq!(pair(&rows[0]), ("        G", "Hello "));
    }

    #[test]
    fn test_floating_chord_between_spaces() {
        let rows = render_rows("x[C] [F] [G]y");
        let (chords, lyrics) = pair(&rows[0]);
        assert_eq!(lyrics, "x  y");
        // F floats two columns right; G then has no room and follows it
        assert_eq!(chords, " C  FG");
    }

    #[test]
    fn test_empty_brackets_are_lyrics() {
        // `[]` is not an annotation, so the line keeps a lyric row
        let rows = render_rows("[] [C]");
        assert_eq!(pair(&rows[0]), ("     C", "[] "));
        assert_eq!(render_rows("[]"), vec![RenderRow::PlainLine { text: "[]".to_string() }]);
    }

    #[test]
    fn test_accented_lyrics_count_chars() {
        let rows = render_rows("[D]Canción [A]mía");
        assert_eq!(pair(&rows[0]), ("D       A", "Canción mía"));
    }

    #[test]
    fn test_custom_separator() {
        let options = RenderOptions {
            chords_only_separator: " | ".to_string(),
            ..RenderOptions::default()
        };
        assert_eq!(
            render_rows_with("[A] [E]", &options),
            vec![RenderRow::ChordsOnlyLine { chords: "A | E".to_string() }]
        );
    }

    #[test]
    fn test_rows_are_stable() {
        let song = "[G]One\n\n[C]Two [D]\nplain";
        assert_eq!(render_rows(song), render_rows(song));
        assert_eq!(render_rows(song).len(), 4);
    }

    #[test]
    fn test_pagination_threshold() {
        let ten = vec![RenderRow::Blank; 10];
        assert_eq!(paginate_book_mode(&ten), BookLayout::Single(&ten));
        assert_eq!(paginate_book_mode(&ten).column_count(), 1);

        let eleven = vec![RenderRow::Blank; 11];
        match paginate_book_mode(&eleven) {
            BookLayout::TwoColumn { left, right } => {
                assert_eq!(left.len(), 6);
                assert_eq!(right.len(), 5);
            }
            other => panic!("expected two columns, got {:?}", other),
        }

        let empty: Vec<RenderRow> = Vec::new();
        assert_eq!(paginate_book_mode(&empty).column_count(), 1);
    }

    #[test]
    fn test_pagination_custom_threshold() {
        let rows = vec![RenderRow::Blank; 4];
        let options = RenderOptions {
            book_mode_threshold: 3,
            ..RenderOptions::default()
        };
        match paginate_book_mode_with(&rows, &options) {
            BookLayout::TwoColumn { left, right } => assert_eq!((left.len(), right.len()), (2, 2)),
            other => panic!("expected two columns, got {:?}", other),
        }
    }

    #[test]
    fn test_format_rows() {
        let rows = render_rows("[G]Hello [D]world\n\nOutro\n[Am] [E]");
        assert_eq!(format_rows(&rows), "G     D\nHello world\n\nOutro\nAm    E");
    }

    #[test]
    fn test_format_book_two_columns() {
        let rows: Vec<RenderRow> = (0..11)
            .map(|i| RenderRow::PlainLine { text: format!("line {}", i) })
            .collect();
        let options = RenderOptions::default();
        let text = format_book(&paginate_book_mode(&rows), &options);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "line 0    line 6");
        assert_eq!(lines[5], "line 5");
    }

    #[test]
    fn test_options_from_yaml() {
        let yaml = "chords-only-separator: \"  \"\ncolumn-gap: 8\n";
        let options = RenderOptions::from_yaml_str(yaml).unwrap();
        assert_eq!(options.chords_only_separator, "  ");
        assert_eq!(options.column_gap, 8);
        assert_eq!(options.book_mode_threshold, 10);

        assert_eq!(RenderOptions::from_yaml_str("").unwrap(), RenderOptions::default());
        assert!(matches!(
            RenderOptions::from_yaml_str("colour: red"),
            Err(ChordSheetError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rows_serialize_with_type_tag() {
        let rows = render_rows("[C]Hi\n");
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"[{"type":"chordLyricPair","chords":"C","lyrics":"Hi"}]"#);
    }
}
