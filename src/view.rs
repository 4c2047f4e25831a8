//! # View State
//!
//! The song viewer's UI state as one immutable value. Every user gesture is a
//! [`ViewAction`]; [`ViewState::apply`] returns the next state and never
//! touches the song text, so the engine underneath stays pure.
//!
//! ```text
//! SelectSong ──> offset = override or 0, target label = display key
//! TransposeStep(±1) ──> offset += step, target label refreshed
//! EditTargetKey("Bb") ──> only the input text changes
//! ApplyTargetKey ──> offset = target - original, or unchanged if either
//!                    key is not a plain note name
//! ```

use crate::key::{detect_key, offset_between};
use crate::song::ContentVariant;
use crate::transpose::transpose_chord;

/// Number of font size steps offered by the viewer.
pub const FONT_SIZE_STEPS: usize = 6;
/// Step selected when the viewer opens.
pub const DEFAULT_FONT_SIZE_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Key detected from the selected song's untransposed text.
    pub original_key: String,
    pub transpose_offset: i32,
    /// Text in the target-key box; may be mid-edit and unresolvable.
    pub target_key_input: String,
    pub font_size_index: usize,
    pub book_mode: bool,
    pub auto_scroll: bool,
    pub variant: ContentVariant,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            original_key: String::new(),
            transpose_offset: 0,
            target_key_input: String::new(),
            font_size_index: DEFAULT_FONT_SIZE_INDEX,
            book_mode: false,
            auto_scroll: false,
            variant: ContentVariant::Main,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Open a song, optionally at a stored setlist offset.
    SelectSong {
        content: String,
        transpose: Option<i32>,
    },
    TransposeStep(i32),
    EditTargetKey(String),
    ApplyTargetKey,
    ChangeFontSize(i32),
    ToggleBookMode,
    ToggleAutoScroll,
    SelectVariant(ContentVariant),
}

impl ViewState {
    /// Key label for the current offset.
    pub fn display_key(&self) -> String {
        transpose_chord(&self.original_key, self.transpose_offset)
    }

    pub fn apply(self, action: ViewAction) -> ViewState {
        match action {
            ViewAction::SelectSong { content, transpose } => {
                let mut next = ViewState {
                    original_key: detect_key(&content).key,
                    transpose_offset: transpose.unwrap_or(0),
                    auto_scroll: false,
                    ..self
                };
                next.target_key_input = next.display_key();
                next
            }
            ViewAction::TransposeStep(step) => {
                let mut next = ViewState {
                    transpose_offset: self.transpose_offset.saturating_add(step),
                    ..self
                };
                next.target_key_input = next.display_key();
                next
            }
            ViewAction::EditTargetKey(input) => ViewState {
                target_key_input: normalize_key_input(&input),
                ..self
            },
            ViewAction::ApplyTargetKey => {
                if self.target_key_input.is_empty() {
                    return self;
                }
                let offset = offset_between(
                    &self.original_key,
                    &self.target_key_input,
                    self.transpose_offset,
                );
                ViewState {
                    transpose_offset: offset,
                    ..self
                }
            }
            ViewAction::ChangeFontSize(direction) => {
                let index = self.font_size_index as i64 + direction as i64;
                if (0..FONT_SIZE_STEPS as i64).contains(&index) {
                    ViewState {
                        font_size_index: index as usize,
                        ..self
                    }
                } else {
                    self
                }
            }
            ViewAction::ToggleBookMode => ViewState {
                book_mode: !self.book_mode,
                ..self
            },
            ViewAction::ToggleAutoScroll => ViewState {
                auto_scroll: !self.auto_scroll,
                ..self
            },
            ViewAction::SelectVariant(variant) => ViewState { variant, ..self },
        }
    }
}

/// Uppercase the note letter only, so a typed `bb` becomes `Bb` rather than `BB`.
fn normalize_key_input(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
