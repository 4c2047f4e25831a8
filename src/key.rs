//! # Key Detection
//!
//! Works out a song's nominal key from its untransposed text, and converts
//! between a transpose offset and the key label shown to the player.
//!
//! ## Detection Order
//! 1. An explicit directive `{key: D}` or `{k: D}` (tag is case-insensitive).
//!    The value is returned trimmed but otherwise as written, so `{key: Bbm}`
//!    yields `"Bbm"`.
//! 2. The root of the first chord annotation: `[Em7]` yields `"E"`.
//! 3. `"C"`.
//!
//! ## Offsets
//! An offset is the pitch-class index difference `target - original`, so it
//! stays in -11..=11 when derived from a key pair, but stepping can push it
//! anywhere. A target key that does not resolve never changes the offset.

use crate::chord::split_root;
use crate::lexer::Lexer;
use crate::pitch::resolve_note;
use crate::transpose::transpose_chord;

pub const DEFAULT_KEY: &str = "C";

/// Where a detected key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Directive,
    FirstChord,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedKey {
    pub key: String,
    pub source: KeySource,
}

/// Find the value of the first `{key: ...}` / `{k: ...}` directive.
///
/// # Examples
/// ```
/// use chordsheet::key::key_directive;
///
/// assert_eq!(key_directive("{Key: F#m}\n[F#m]Hey"), Some("F#m"));
/// assert_eq!(key_directive("{title: Hey}"), None);
/// ```
pub fn key_directive(content: &str) -> Option<&str> {
    let mut rest = content;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after.find('}')?;
        if let Some((tag, value)) = after[..close].split_once(':') {
            let tag = tag.trim();
            let value = value.trim();
            if (tag.eq_ignore_ascii_case("key") || tag.eq_ignore_ascii_case("k"))
                && !value.is_empty()
            {
                return Some(value);
            }
        }
        rest = after;
    }
    None
}

/// Detect the key and report which rule produced it.
pub fn detect_key(content: &str) -> DetectedKey {
    let detected = detect(content);
    tracing::debug!(key = %detected.key, source = ?detected.source, "detected original key");
    detected
}

fn detect(content: &str) -> DetectedKey {
    let default = DetectedKey {
        key: DEFAULT_KEY.to_string(),
        source: KeySource::Default,
    };
    if content.is_empty() {
        return default;
    }

    if let Some(value) = key_directive(content) {
        return DetectedKey {
            key: value.to_string(),
            source: KeySource::Directive,
        };
    }

    let first_chord = Lexer::new(content).find_map(|token| token.chord());
    match first_chord.and_then(split_root) {
        Some((root, _)) => DetectedKey {
            key: root.to_string(),
            source: KeySource::FirstChord,
        },
        None => default,
    }
}

/// The song's nominal original key.
///
/// # Examples
/// ```
/// use chordsheet::original_key;
///
/// assert_eq!(original_key("{key: D}\n[D]Verse"), "D");
/// assert_eq!(original_key("[Em7]only chord"), "E");
/// assert_eq!(original_key(""), "C");
/// ```
pub fn original_key(content: &str) -> String {
    detect_key(content).key
}

/// Offset that moves `original` to `target`, or `current` if either key
/// does not resolve to a pitch class.
pub fn offset_between(original: &str, target: &str, current: i32) -> i32 {
    match (resolve_note(original), resolve_note(target.trim())) {
        (Some(from), Some(to)) => {
            let offset = from.semitones_to(to);
            tracing::debug!(original, target, offset, "target key applied");
            offset
        }
        _ => {
            tracing::debug!(original, target, current, "target key ignored");
            current
        }
    }
}

/// Offset needed to play `content` in `target`, keeping `current` when the
/// target (or the detected original key) is not a plain note name.
///
/// # Examples
/// ```
/// use chordsheet::offset_for_target_key;
///
/// assert_eq!(offset_for_target_key("[G]Hi", "A", 0), -10);
/// assert_eq!(offset_for_target_key("[G]Hi", "Eb", 0), -4);
/// assert_eq!(offset_for_target_key("[G]Hi", "H", 5), 5);
/// ```
pub fn offset_for_target_key(content: &str, target: &str, current: i32) -> i32 {
    offset_between(&original_key(content), target, current)
}

/// Key label for `content` played at `offset`, always sharp-spelled.
///
/// Matches `transpose_chord(original_key(content), offset)`, including for
/// directive values that carry a quality such as `Am`.
pub fn display_key(content: &str, offset: i32) -> String {
    transpose_chord(&original_key(content), offset)
}
