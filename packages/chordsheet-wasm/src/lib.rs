use serde::Serialize;
use wasm_bindgen::prelude::*;

use chordsheet::{BookLayout, ChordSheetError, ContentVariant, Song};

#[derive(Serialize)]
struct BindingError {
    message: String,
    kind: &'static str,
}

fn error_to_binding_error(e: ChordSheetError) -> BindingError {
    let kind = match &e {
        ChordSheetError::Io { .. } => "io",
        ChordSheetError::MetadataError(_) => "metadata",
        ChordSheetError::ConfigError(_) => "config",
        ChordSheetError::VariantUnavailable { .. } => "variant-unavailable",
        ChordSheetError::UnknownVariant(_) => "unknown-variant",
        ChordSheetError::OutputError(_) => "output",
    };
    BindingError {
        message: e.to_string(),
        kind,
    }
}

fn to_js_error(e: ChordSheetError) -> JsValue {
    let error = error_to_binding_error(e);
    JsValue::from_str(&serde_json::to_string(&error).unwrap_or_else(|_| error.message.clone()))
}

fn layout_json(layout: &BookLayout<'_>) -> Result<String, JsValue> {
    serde_json::to_string(layout)
        .map_err(|e| to_js_error(ChordSheetError::OutputError(e.to_string())))
}

/// Transpose every chord annotation in the song text
#[wasm_bindgen]
pub fn transpose_song(content: &str, offset: i32) -> String {
    chordsheet::transpose_song_content(content, offset)
}

/// Transpose a single chord symbol
#[wasm_bindgen]
pub fn transpose_chord(chord: &str, offset: i32) -> String {
    chordsheet::transpose_chord(chord, offset)
}

#[wasm_bindgen]
pub fn original_key(content: &str) -> String {
    chordsheet::original_key(content)
}

/// Key label shown for the song at the given offset
#[wasm_bindgen]
pub fn display_key(content: &str, offset: i32) -> String {
    chordsheet::display_key(content, offset)
}

/// New offset for a typed target key; returns `current` when the key is not a note
#[wasm_bindgen]
pub fn offset_for_target_key(content: &str, target: &str, current: i32) -> i32 {
    chordsheet::offset_for_target_key(content, target, current)
}

/// Render song text to JSON rows, split into two columns in book mode
#[wasm_bindgen]
pub fn render(content: &str, offset: i32, book_mode: bool) -> Result<String, JsValue> {
    let rows = chordsheet::render_song(content, offset);
    let layout = if book_mode {
        chordsheet::paginate_book_mode(&rows)
    } else {
        BookLayout::Single(&rows)
    };
    layout_json(&layout)
}

/// Render one content variant of a YAML song record
#[wasm_bindgen]
pub fn render_record(
    record: &str,
    variant: &str,
    offset: i32,
    book_mode: bool,
) -> Result<String, JsValue> {
    let song = Song::from_yaml(record).map_err(to_js_error)?;
    let variant: ContentVariant = variant.parse().map_err(to_js_error)?;
    let rows = song.render(variant, offset).map_err(to_js_error)?;
    let layout = if book_mode {
        chordsheet::paginate_book_mode(&rows)
    } else {
        BookLayout::Single(&rows)
    };
    layout_json(&layout)
}
