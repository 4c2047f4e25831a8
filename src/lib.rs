pub mod cache;
pub mod chord;
pub mod error;
pub mod key;
pub mod layout;
pub mod lexer;
pub mod pitch;
pub mod song;
pub mod transpose;
pub mod view;

pub use cache::{RenderCache, RenderKey, RenderedSong};
pub use chord::{parse_chord, ChordSymbol};
pub use error::*;
pub use key::{display_key, offset_for_target_key, original_key};
pub use layout::{
    format_book, format_rows, paginate_book_mode, render_rows, BookLayout, RenderOptions,
    RenderRow,
};
pub use pitch::{resolve_note, spell, PitchClass};
pub use song::{ContentVariant, SetlistEntry, Song};
pub use transpose::{transpose_chord, transpose_song_content};
pub use view::{ViewAction, ViewState};

/// Transpose a song and lay it out.
/// This is the main entry point for the library.
///
/// ```
/// let rows = chordsheet::render_song("[G]Hello [D]world", 2);
/// assert_eq!(
///     rows,
///     vec![chordsheet::RenderRow::ChordLyricPair {
///         chords: "A     E".to_string(),
///         lyrics: "Hello world".to_string(),
///     }]
/// );
/// ```
pub fn render_song(content: &str, offset: i32) -> Vec<RenderRow> {
    render_rows(&transpose_song_content(content, offset))
}

/// Transpose, lay out and format a song as monospaced text.
pub fn render_song_text(
    content: &str,
    offset: i32,
    book_mode: bool,
    options: &RenderOptions,
) -> String {
    let rows = layout::render_rows_with(&transpose_song_content(content, offset), options);
    if book_mode {
        format_book(&layout::paginate_book_mode_with(&rows, options), options)
    } else {
        format_rows(&rows)
    }
}
