//! # Transposition
//!
//! Shifts chord annotations by a signed number of semitones.
//!
//! Output is always sharp-spelled: `Db` up one semitone is `D`, and `Db`
//! shifted by zero through [`transpose_chord`] comes back as `C#`. Only the
//! note names change; suffixes and every character outside `[...]` are kept
//! byte for byte. Key directives such as `{key: D}` are plain text here and
//! are not rewritten.
//!
//! ## Degradation
//! - A root or bass whose spelling does not resolve (`Cb`, `E#`) is kept as
//!   written. In a slash chord the other half is still shifted.
//! - An annotation that is not a chord at all (`[N.C.]`, `[x2]`) is kept.

use crate::chord::{parse_chord, ChordSymbol};
use crate::lexer::{Lexer, Token};
use crate::pitch::{resolve_note, spell};

/// Transpose a single chord symbol.
///
/// # Examples
/// ```
/// use chordsheet::transpose_chord;
///
/// assert_eq!(transpose_chord("G/B", 2), "A/C#");
/// assert_eq!(transpose_chord("Db", 1), "D");
/// assert_eq!(transpose_chord("Am7", -2), "Gm7");
/// assert_eq!(transpose_chord("N.C.", 5), "N.C.");
/// ```
pub fn transpose_chord(chord: &str, amount: i32) -> String {
    if chord.is_empty() {
        return String::new();
    }
    match parse_chord(chord) {
        Some(symbol) => transpose_symbol(&symbol, amount),
        None => chord.to_string(),
    }
}

/// Transpose an already parsed chord symbol back into text.
pub fn transpose_symbol(symbol: &ChordSymbol<'_>, amount: i32) -> String {
    let root = shift_note(symbol.root, amount);
    match symbol.bass {
        Some(bass) => format!(
            "{}{}/{}{}",
            root,
            symbol.root_suffix,
            shift_note(bass, amount),
            symbol.bass_suffix
        ),
        None => format!("{}{}", root, symbol.root_suffix),
    }
}

/// Shift one spelled note, leaving unresolved spellings unchanged.
fn shift_note(note: &str, amount: i32) -> &str {
    match resolve_note(note) {
        Some(pitch) => spell(pitch.shift(amount)),
        None => {
            tracing::trace!(note, "unresolved note left untransposed");
            note
        }
    }
}

/// Transpose every chord annotation in a block of annotated text.
///
/// Returns the content unchanged when it is empty or `amount` is zero.
///
/// # Examples
/// ```
/// use chordsheet::transpose_song_content;
///
/// let song = "{key: G}\n[G]Amazing [G/B]grace";
/// assert_eq!(
///     transpose_song_content(song, 2),
///     "{key: G}\n[A]Amazing [A/C#]grace"
/// );
/// assert_eq!(transpose_song_content("[C]Hi", 0), "[C]Hi");
/// ```
pub fn transpose_song_content(content: &str, amount: i32) -> String {
    if content.is_empty() || amount == 0 {
        return content.to_string();
    }

    let mut output = String::with_capacity(content.len() + content.len() / 8);
    let mut chords = 0usize;
    for token in Lexer::new(content) {
        match token {
            Token::Literal(text) => output.push_str(text),
            Token::Chord(chord) => {
                output.push('[');
                output.push_str(&transpose_chord(chord, amount));
                output.push(']');
                chords += 1;
            }
        }
    }
    tracing::debug!(amount, chords, "transposed song content");
    output
}
