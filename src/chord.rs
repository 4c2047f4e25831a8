//! Chord symbol parsing for transposition
//!
//! Splits a chord symbol into its root note, an opaque suffix, and for slash
//! chords the bass note and its suffix. Suffixes (`m7`, `sus4`, `add9`, ...)
//! are never interpreted; they ride along through transposition untouched.
//!
//! # Forms
//! - **Slash**: `<root><suffix>/<bass><suffix>` with exactly one `/`, e.g. `D/F#`, `Am7/G`
//! - **Simple**: `<root><suffix>`, where the suffix is everything after the root, e.g. `Bbmaj7`
//!
//! A note is one letter `A`-`G` optionally followed by `#` or `b`. Whether that
//! spelling actually resolves to a pitch class is decided later by
//! [`crate::pitch::resolve_note`], so `Cb7` still parses here with root `Cb`.

use std::fmt;

/// A parsed chord symbol borrowing from the annotation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordSymbol<'a> {
    pub root: &'a str,
    pub root_suffix: &'a str,
    pub bass: Option<&'a str>,
    pub bass_suffix: &'a str,
}

impl ChordSymbol<'_> {
    pub fn is_slash(&self) -> bool {
        self.bass.is_some()
    }
}

impl fmt::Display for ChordSymbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.root_suffix)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}{}", bass, self.bass_suffix)?;
        }
        Ok(())
    }
}

/// Split a leading note pattern off `text`.
///
/// Returns `(note, rest)` when `text` starts with `A`-`G`, taking one
/// following `#` or `b` into the note.
///
/// # Examples
/// ```
/// use chordsheet::chord::split_root;
///
/// assert_eq!(split_root("Bbm7"), Some(("Bb", "m7")));
/// assert_eq!(split_root("F#"), Some(("F#", "")));
/// assert_eq!(split_root("N.C."), None);
/// ```
pub fn split_root(text: &str) -> Option<(&str, &str)> {
    let mut chars = text.chars();
    match chars.next() {
        Some('A'..='G') => {}
        _ => return None,
    }
    let len = match chars.next() {
        Some('#') | Some('b') => 2,
        _ => 1,
    };
    Some(text.split_at(len))
}

/// Parse a chord symbol.
///
/// The slash form is tried first; when it does not match the whole text, the
/// simple form is used with everything after the root as suffix. Returns
/// `None` when the text does not start with a note at all (`N.C.`, `x2`,
/// empty), meaning the annotation is not a chord and stays as written.
///
/// # Examples
/// ```
/// use chordsheet::chord::parse_chord;
///
/// let chord = parse_chord("Am7/G").unwrap();
/// assert_eq!(chord.root, "A");
/// assert_eq!(chord.root_suffix, "m7");
/// assert_eq!(chord.bass, Some("G"));
///
/// assert!(parse_chord("N.C.").is_none());
/// ```
pub fn parse_chord(text: &str) -> Option<ChordSymbol<'_>> {
    let (root, rest) = split_root(text)?;
    parse_slash(root, rest).or(Some(ChordSymbol {
        root,
        root_suffix: rest,
        bass: None,
        bass_suffix: "",
    }))
}

fn parse_slash<'a>(root: &'a str, rest: &'a str) -> Option<ChordSymbol<'a>> {
    let (root_suffix, after_slash) = rest.split_once('/')?;
    let (bass, bass_suffix) = split_root(after_slash)?;
    if bass_suffix.contains('/') {
        return None;
    }
    Some(ChordSymbol {
        root,
        root_suffix,
        bass: Some(bass),
        bass_suffix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_chords() {
        let c = parse_chord("C").unwrap();
        assert_eq!((c.root, c.root_suffix, c.bass), ("C", "", None));

        let bbmaj7 = parse_chord("Bbmaj7").unwrap();
        assert_eq!((bbmaj7.root, bbmaj7.root_suffix), ("Bb", "maj7"));

        let fsharp = parse_chord("F#m7b5").unwrap();
        assert_eq!((fsharp.root, fsharp.root_suffix), ("F#", "m7b5"));
    }

    #[test]
    fn test_slash_chords() {
        let g_over_b = parse_chord("G/B").unwrap();
        assert_eq!(g_over_b.root, "G");
        assert_eq!(g_over_b.bass, Some("B"));
        assert!(g_over_b.is_slash());

        let d = parse_chord("Dsus4/F#add").unwrap();
        assert_eq!(d.root_suffix, "sus4");
        assert_eq!(d.bass, Some("F#"));
        assert_eq!(d.bass_suffix, "add");
    }

    #[test]
    fn test_slash_fallback_to_simple() {
        // Bass is not a note: whole remainder becomes the root suffix
        let c = parse_chord("C/x").unwrap();
        assert_eq!(c.bass, None);
        assert_eq!(c.root_suffix, "/x");

        // Two slashes never form a slash chord
        let c = parse_chord("C/G/B").unwrap();
        assert_eq!(c.bass, None);
        assert_eq!(c.root_suffix, "/G/B");

        // 6/9 chords keep their slash in the suffix
        let c = parse_chord("C6/9").unwrap();
        assert_eq!(c.bass, None);
        assert_eq!(c.root_suffix, "6/9");
    }

    #[test]
    fn test_not_a_chord() {
        assert!(parse_chord("").is_none());
        assert!(parse_chord("N.C.").is_none());
        assert!(parse_chord("x2").is_none());
        assert!(parse_chord("am").is_none());
    }

    #[test]
    fn test_display_reassembles() {
        for text in ["C", "Am7/G", "D/F#", "Ebsus2", "C/x"] {
            assert_eq!(parse_chord(text).unwrap().to_string(), text);
        }
    }
}
