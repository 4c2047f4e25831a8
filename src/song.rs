//! # Song Records
//!
//! The song and setlist-entry shapes handed to the engine by the song store,
//! plus a file format for keeping single songs on disk.
//!
//! ## Song Documents
//! A plain text file with an optional YAML header fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Amazing Grace
//! artist: Traditional
//! ---
//! {key: G}
//! [G]Amazing [G/B]grace, how [C]sweet the [G]sound
//! ```
//!
//! Everything after the closing fence is the main content. Without a header
//! the whole file is content.
//!
//! ## YAML Records
//! Files ending in `.yaml` / `.yml` hold the full record, including the
//! alternate `content_notes` and `content_piano` variants.
//!
//! Only the transpose offset is ever stored per setlist entry. Transposed
//! text is always derived again from the original content.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChordSheetError;
use crate::key::original_key;
use crate::layout::{render_rows, RenderRow};
use crate::transpose::{transpose_chord, transpose_song_content};

const FENCE: &str = "---";

/// Which annotated text of a song to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentVariant {
    #[default]
    Main,
    Notes,
    Piano,
}

impl ContentVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentVariant::Main => "main",
            ContentVariant::Notes => "notes",
            ContentVariant::Piano => "piano",
        }
    }
}

impl fmt::Display for ContentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentVariant {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "" => Ok(ContentVariant::Main),
            "notes" => Ok(ContentVariant::Notes),
            "piano" => Ok(ContentVariant::Piano),
            _ => Err(ChordSheetError::UnknownVariant(s.to_string())),
        }
    }
}

/// A song as stored in the shared library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub content: String,
    pub content_notes: Option<String>,
    pub content_piano: Option<String>,
    /// Free text (links, arrangement notes). Never processed.
    pub notes: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct DocumentHeader {
    id: Option<String>,
    title: Option<String>,
    artist: Option<String>,
    notes: Option<String>,
}

impl Song {
    /// Parse a song document (optional `---` YAML header, then content).
    pub fn parse_document(source: &str) -> Result<Self, ChordSheetError> {
        let (header, content) = split_header(source)?;
        let header: DocumentHeader = match header {
            Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)
                .map_err(|e| ChordSheetError::MetadataError(e.to_string()))?,
            _ => DocumentHeader::default(),
        };

        Ok(Song {
            id: header.id.unwrap_or_default(),
            title: header.title.unwrap_or_default(),
            artist: header.artist.unwrap_or_default(),
            content: content.to_string(),
            content_notes: None,
            content_piano: None,
            notes: header.notes.unwrap_or_default(),
        })
    }

    /// Parse a full YAML song record.
    pub fn from_yaml(source: &str) -> Result<Self, ChordSheetError> {
        serde_yaml::from_str(source).map_err(|e| ChordSheetError::MetadataError(e.to_string()))
    }

    /// Load a song from disk, as a YAML record or a song document by extension.
    pub fn load(path: &Path) -> Result<Self, ChordSheetError> {
        let source = fs::read_to_string(path).map_err(|e| ChordSheetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let song = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&source)?,
            _ => Self::parse_document(&source)?,
        };
        tracing::debug!(path = %path.display(), title = %song.title, "loaded song");
        Ok(song)
    }

    /// Annotated text for a variant. The main content is always present.
    pub fn content_for(&self, variant: ContentVariant) -> Result<&str, ChordSheetError> {
        let text = match variant {
            ContentVariant::Main => Some(&self.content),
            ContentVariant::Notes => self.content_notes.as_ref(),
            ContentVariant::Piano => self.content_piano.as_ref(),
        };
        text.map(String::as_str)
            .ok_or_else(|| ChordSheetError::VariantUnavailable {
                variant: variant.to_string(),
            })
    }

    pub fn original_key(&self, variant: ContentVariant) -> Result<String, ChordSheetError> {
        Ok(original_key(self.content_for(variant)?))
    }

    pub fn transposed(
        &self,
        variant: ContentVariant,
        offset: i32,
    ) -> Result<String, ChordSheetError> {
        Ok(transpose_song_content(self.content_for(variant)?, offset))
    }

    /// Transpose and lay out a variant.
    pub fn render(
        &self,
        variant: ContentVariant,
        offset: i32,
    ) -> Result<Vec<RenderRow>, ChordSheetError> {
        Ok(render_rows(&self.transposed(variant, offset)?))
    }
}

/// Split off a leading `---` fenced header, if any.
fn split_header(source: &str) -> Result<(Option<&str>, &str), ChordSheetError> {
    let Some(after_open) = strip_fence_line(source) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let header = &after_open[..offset];
            let content = &after_open[offset + line.len()..];
            return Ok((Some(header), content));
        }
        offset += line.len();
    }
    Err(ChordSheetError::MetadataError(
        "header opened with --- but never closed".to_string(),
    ))
}

/// The text after an opening fence line, when `source` starts with one.
fn strip_fence_line(source: &str) -> Option<&str> {
    let first = source.split_inclusive('\n').next()?;
    (first.trim_end() == FENCE).then_some(&source[first.len()..])
}

/// One song in a setlist, with its own transpose offset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetlistEntry {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub transpose: i32,
}

impl SetlistEntry {
    pub fn for_song(song: &Song, transpose: i32) -> Self {
        Self {
            id: song.id.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            transpose,
        }
    }

    /// Entry with its offset moved by `step` semitones.
    pub fn step(&self, step: i32) -> Self {
        Self {
            transpose: self.transpose.saturating_add(step),
            ..self.clone()
        }
    }

    /// Key label shown next to the entry: the song's original key moved by
    /// this entry's offset.
    pub fn display_key(&self, song: &Song) -> String {
        transpose_chord(&original_key(&song.content), self.transpose)
    }
}
