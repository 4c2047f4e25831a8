//! # Error Types
//!
//! Errors raised by the fallible edges of the crate: loading song documents,
//! reading render configuration, and selecting content variants.
//!
//! The transposition and layout functions never fail. Unknown spellings and
//! malformed annotations degrade to pass-through text instead, so nothing in
//! `pitch`, `chord`, `transpose`, `key` or `layout` returns this type.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{ChordSheetError, Song};
//!
//! match Song::parse_document("---\ntitle: [unclosed\n---\n[C]Hi") {
//!     Ok(song) => println!("{}", song.title),
//!     Err(ChordSheetError::MetadataError(message)) => eprintln!("bad header: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordSheetError {
    /// A file could not be read or written.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::Io {
    ///     path: "songs/yesterday.txt".to_string(),
    ///     message: "No such file or directory".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Error reading 'songs/yesterday.txt': No such file or directory"
    /// );
    /// ```
    #[error("Error reading '{path}': {message}")]
    Io { path: String, message: String },

    /// The YAML header of a song document, or a YAML song record, is invalid.
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    /// Render configuration could not be parsed.
    #[error("Invalid config: {0}")]
    ConfigError(String),

    /// The song has no text for the requested content variant.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::VariantUnavailable { variant: "piano".to_string() };
    /// assert_eq!(err.to_string(), "Song has no 'piano' content");
    /// ```
    #[error("Song has no '{variant}' content")]
    VariantUnavailable { variant: String },

    /// A variant name that is not `main`, `notes` or `piano`.
    #[error("Unknown content variant: {0}")]
    UnknownVariant(String),

    /// Rendered output could not be serialized.
    #[error("Output error: {0}")]
    OutputError(String),
}
