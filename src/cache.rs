//! Memoized rendering
//!
//! Transposing and laying out a song is cheap, but a viewer re-renders on
//! every UI change. [`RenderCache`] keeps the result per song, revision,
//! offset and variant so unchanged inputs are rendered once.
//!
//! The caller owns revisions: bump the revision (or call
//! [`RenderCache::invalidate_song`]) whenever the stored content changes.
//! Rendering a newer revision of a song evicts that song's older revisions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::layout::{render_rows, RenderRow};
use crate::song::ContentVariant;
use crate::transpose::transpose_song_content;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub song_id: String,
    pub revision: u64,
    pub offset: i32,
    pub variant: ContentVariant,
}

/// Transposed text and its rows for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSong {
    pub transposed: String,
    pub rows: Vec<RenderRow>,
}

impl RenderedSong {
    pub fn new(content: &str, offset: i32) -> Self {
        let transposed = transpose_song_content(content, offset);
        let rows = render_rows(&transposed);
        Self { transposed, rows }
    }
}

#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<RenderKey, Arc<RenderedSong>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached render for `key`, rendering `content` on a miss.
    pub fn get_or_render(&mut self, key: RenderKey, content: &str) -> Arc<RenderedSong> {
        if let Some(hit) = self.entries.get(&key) {
            tracing::trace!(song = %key.song_id, offset = key.offset, "render cache hit");
            return Arc::clone(hit);
        }
        tracing::debug!(
            song = %key.song_id,
            revision = key.revision,
            offset = key.offset,
            variant = %key.variant,
            "render cache miss"
        );
        self.evict_older_revisions(&key.song_id, key.revision);
        let rendered = Arc::new(RenderedSong::new(content, key.offset));
        self.entries.insert(key, Arc::clone(&rendered));
        rendered
    }

    fn evict_older_revisions(&mut self, song_id: &str, revision: u64) {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.song_id != song_id || key.revision >= revision);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!(song = song_id, revision, evicted, "evicted stale revisions");
        }
    }

    /// Drop every cached render of a song.
    pub fn invalidate_song(&mut self, song_id: &str) {
        self.entries.retain(|key, _| key.song_id != song_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(song_id: &str, revision: u64, offset: i32) -> RenderKey {
        RenderKey {
            song_id: song_id.to_string(),
            revision,
            offset,
            variant: ContentVariant::Main,
        }
    }

    #[test]
    fn test_hit_returns_same_render() {
        let mut cache = RenderCache::new();
        let first = cache.get_or_render(key("a", 1, 2), "[C]la");
        // Content is ignored on a hit; the key alone identifies the render
        let second = cache.get_or_render(key("a", 1, 2), "[G]other");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.transposed, "[D]la");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_render_separately() {
        let mut cache = RenderCache::new();
        let up = cache.get_or_render(key("a", 1, 2), "[C]la");
        let down = cache.get_or_render(key("a", 1, -10), "[C]la");
        assert_eq!(up.rows, down.rows);
        assert!(!Arc::ptr_eq(&up, &down));

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_new_revision_evicts_older_ones() {
        let mut cache = RenderCache::new();
        cache.get_or_render(key("a", 1, 0), "[C]la");
        cache.get_or_render(key("a", 1, 1), "[C]la");
        cache.get_or_render(key("b", 1, 0), "[C]la");

        let edited = cache.get_or_render(key("a", 2, 2), "[F]la");
        assert_eq!(edited.transposed, "[G]la");
        assert_eq!(cache.len(), 2);

        // Other offsets of the current revision are kept
        cache.get_or_render(key("a", 2, 3), "[F]la");
        assert_eq!(cache.len(), 3);
        let again = cache.get_or_render(key("a", 2, 2), "[Bb]ignored");
        assert!(Arc::ptr_eq(&edited, &again));
    }

    #[test]
    fn test_invalidate_song() {
        let mut cache = RenderCache::new();
        cache.get_or_render(key("a", 1, 0), "[C]la");
        cache.get_or_render(key("a", 1, 1), "[C]la");
        cache.get_or_render(key("b", 1, 0), "[C]la");
        cache.invalidate_song("a");
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
