//! # Pitch Model
//!
//! Twelve pitch classes indexed from A, with a sharp and a flat spelling for
//! each. Index 0 is A, index 3 is C.
//!
//! ```text
//! index  0  1   2  3  4   5  6   7  8  9   10 11
//! sharp  A  A#  B  C  C#  D  D#  E  F  F#  G  G#
//! flat   A  Bb  B  C  Db  D  Eb  E  F  Gb  G  Ab
//! ```
//!
//! Lookup is exact and case-sensitive. Spellings outside both tables
//! (`H`, `Cb`, `E#`, `c`) do not resolve, and callers leave such notes as
//! they were written.

/// Sharp spellings, also used for all output.
pub const SHARP_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Flat spellings, sharing indices with [`SHARP_NAMES`].
pub const FLAT_NAMES: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

/// One of the twelve equal-tempered pitch classes, stored as an index in 0..12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build from any integer, reducing modulo 12.
    pub fn new(index: i32) -> Self {
        Self(index.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Shift by a signed number of semitones. Offsets outside 0..12 wrap.
    pub fn shift(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones.rem_euclid(12))
    }

    /// Signed distance `other - self` in semitones, in -11..=11.
    pub fn semitones_to(self, other: PitchClass) -> i32 {
        other.0 as i32 - self.0 as i32
    }
}

/// Resolve a spelled note name to its pitch class.
///
/// The sharp table is searched first, then the flat table. Returns `None`
/// for anything that is not exactly one of the 17 listed spellings.
///
/// # Examples
/// ```
/// use chordsheet::pitch::resolve_note;
///
/// assert_eq!(resolve_note("C#"), resolve_note("Db"));
/// assert_eq!(resolve_note("A").map(|p| p.index()), Some(0));
/// assert_eq!(resolve_note("H"), None);
/// ```
pub fn resolve_note(name: &str) -> Option<PitchClass> {
    SHARP_NAMES
        .iter()
        .position(|&n| n == name)
        .or_else(|| FLAT_NAMES.iter().position(|&n| n == name))
        .map(|i| PitchClass(i as u8))
}

/// Sharp spelling of a pitch class. Flat input never comes back out.
pub fn spell(pitch: PitchClass) -> &'static str {
    SHARP_NAMES[pitch.0 as usize]
}
