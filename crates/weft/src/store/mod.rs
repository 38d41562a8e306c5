//! The compiled template store.
//!
//! Compiled entries live in five flat tables: a shared codepoint pool,
//! format markers, match keys, matchers, and template entries. Tables are
//! addressed by `(start, len)` spans of 16-bit indices instead of owned
//! sub-trees, which keeps the store free of per-entry allocation and lets a
//! locale change discard and rebuild it as one unit.
//!
//! A store is produced by [`StoreBuilder`] and is immutable afterwards;
//! instantiation only reads it.

mod builder;
mod registry;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use builder::{CompileError, StoreBuilder};
pub use registry::{AttributeRegistry, PREDEFINED_ATTRIBUTES};

use crate::types::{AttrList, FormatPayload};

/// A `(start, len)` index range into one of the flat tables.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: u16,
    pub len: u16,
}

impl Span {
    pub fn range(self) -> std::ops::Range<usize> {
        self.start as usize..(self.start as usize + self.len as usize)
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// A stored format marker: a chunk-local character offset plus payload.
///
/// Offsets are relative to the owning matcher's text span; instantiation
/// re-bases them to absolute output positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMarker {
    pub offset: u16,
    pub payload: FormatPayload,
}

/// One necessary match condition: parameter `param` must carry `required`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchKey {
    pub required: crate::types::AttrId,
    pub param: u8,
}

/// One compiled literal chunk of a template, optionally guarded by keys.
///
/// `keys.len == 0` means the chunk is unconditional. Matchers produced by
/// one `\match` construct share a `group`; unconditioned chunks each get a
/// group of their own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    /// Characters in the codepoint pool.
    pub text: Span,
    /// Markers in the marker table, offsets local to `text`.
    pub markers: Span,
    /// Keys in the key table.
    pub keys: Span,
    pub group: u16,
}

/// One compiled template entry ("function").
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateEntry {
    pub name: String,
    /// The entry's matchers, in source order.
    pub matchers: Span,
    /// Number of call parameters the body references.
    pub param_count: u16,
    /// Attributes an instance of this entry carries.
    pub result_attributes: AttrList,
}

/// Identifier of a compiled entry within one store.
///
/// Ids are store indices: stable for the lifetime of the store they came
/// from, invalidated by a recompilation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub(crate) u16);

impl EntryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

/// The compiled template store: five flat tables plus the name registries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStore {
    pool: Vec<char>,
    markers: Vec<PoolMarker>,
    keys: Vec<MatchKey>,
    matchers: Vec<Matcher>,
    entries: Vec<TemplateEntry>,
    names: HashMap<String, EntryId>,
    attributes: AttributeRegistry,
    fonts: Vec<String>,
}

impl TextStore {
    /// Compile source text into a fresh store.
    ///
    /// Convenience over [`StoreBuilder`] for single-source compilation.
    ///
    /// # Example
    ///
    /// ```
    /// use weft::TextStore;
    ///
    /// let store = TextStore::compile(r"greeting { Hello }", Vec::new()).unwrap();
    /// assert_eq!(store.entry_count(), 1);
    /// assert!(store.entry_id("greeting").is_some());
    /// ```
    pub fn compile(source: &str, fonts: Vec<String>) -> Result<TextStore, CompileError> {
        let mut builder = StoreBuilder::new(fonts);
        builder.add_source(source)?;
        Ok(builder.finish())
    }

    /// Look up an entry id by name (case-sensitive).
    pub fn entry_id(&self, name: &str) -> Option<EntryId> {
        self.names.get(name).copied()
    }

    /// Get a compiled entry.
    pub fn entry(&self, id: EntryId) -> Option<&TemplateEntry> {
        self.entries.get(id.index())
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &TemplateEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (EntryId(i as u16), e))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// The attribute registry this store was compiled with.
    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    /// The font name table; [`FormatPayload::Font`] indices point here.
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    /// The matchers of a span, for evaluation.
    pub fn matchers(&self, span: Span) -> &[Matcher] {
        &self.matchers[span.range()]
    }

    /// The match keys of a matcher.
    pub fn match_keys(&self, matcher: &Matcher) -> &[MatchKey] {
        &self.keys[matcher.keys.range()]
    }

    /// The literal text of a matcher's chunk.
    pub fn chunk_text(&self, matcher: &Matcher) -> &[char] {
        &self.pool[matcher.text.range()]
    }

    /// The chunk-local markers of a matcher.
    pub fn chunk_markers(&self, matcher: &Matcher) -> &[PoolMarker] {
        &self.markers[matcher.markers.range()]
    }

    /// Total size of the codepoint pool, in characters.
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}
