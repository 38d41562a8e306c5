//! Lowering of parsed entry definitions into the flat-table store.

use thiserror::Error;

use crate::parser::ast::{Condition, EntryDef, MatchArm, Segment};
use crate::parser::{ParseError, parse_source};
use crate::store::{EntryId, MatchKey, Matcher, PoolMarker, Span, TemplateEntry, TextStore};
use crate::types::{AttrList, FormatPayload, StyleTag};

/// The filler character a `\N` placeholder occupies in the pool until it is
/// spliced at instantiation time.
pub(crate) const FILLER: char = '?';

/// An error that occurred while compiling entry definitions into a store.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Entry names are unique keys.
    #[error("entry '{name}' is defined twice")]
    DuplicateEntry { name: String },

    /// An attr-block with more than eight names.
    #[error("too many attributes on entry '{entry}': at most {max}", max = AttrList::CAPACITY)]
    TooManyAttributes { entry: String },

    /// The attribute registry left the signed 8-bit id range.
    #[error("attribute registry overflow while registering '{name}'")]
    AttributeOverflow { name: String },

    /// A `\font` command naming a font absent from the font table.
    #[error("unknown font '{name}' in entry '{entry}'")]
    UnknownFont { name: String, entry: String },

    /// A `\match` inside a `\match` alternative or an `\it` span; a matcher
    /// is one flat chunk and cannot carry its own alternative set.
    #[error("nested '\\match' is not supported (entry '{entry}')")]
    NestedMatch { entry: String },

    /// A flat table outgrew its 16-bit index space.
    #[error("store table overflow: too many {what}")]
    StoreOverflow { what: &'static str },
}

/// Builds a [`TextStore`] from parsed entry definitions.
///
/// The builder is the only mutable phase of a store's life: feed it sources
/// or definitions, then consume it with [`finish`](StoreBuilder::finish) to
/// obtain the immutable store.
///
/// # Example
///
/// ```
/// use weft::StoreBuilder;
///
/// let mut builder = StoreBuilder::new(Vec::new());
/// builder.add_source(r"sword {masc} { sword }").unwrap();
/// let store = builder.finish();
/// assert_eq!(store.entry_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StoreBuilder {
    store: TextStore,
    next_group: u16,
}

/// A text chunk being accumulated, before it becomes a matcher.
#[derive(Default)]
struct Chunk {
    text: Vec<char>,
    markers: Vec<PoolMarker>,
}

impl Chunk {
    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.markers.is_empty()
    }

    /// Record a marker at the current chunk-local position.
    fn mark(&mut self, payload: FormatPayload) -> Result<(), CompileError> {
        let offset = index_u16(self.text.len(), "codepoints in one chunk")?;
        self.markers.push(PoolMarker { offset, payload });
        Ok(())
    }
}

impl StoreBuilder {
    /// Create a builder with the given font name table.
    pub fn new(fonts: Vec<String>) -> StoreBuilder {
        StoreBuilder {
            store: TextStore {
                fonts,
                ..TextStore::default()
            },
            next_group: 0,
        }
    }

    /// Parse source text and add every entry it defines.
    ///
    /// Returns the number of entries added. On error the builder must be
    /// discarded; partial compilation is never activated.
    pub fn add_source(&mut self, source: &str) -> Result<usize, CompileError> {
        let defs = parse_source(source)?;
        let count = defs.len();
        for def in &defs {
            self.add_entry(def)?;
        }
        Ok(count)
    }

    /// Lower one parsed definition into the tables.
    pub fn add_entry(&mut self, def: &EntryDef) -> Result<EntryId, CompileError> {
        if self.store.names.contains_key(&def.name) {
            return Err(CompileError::DuplicateEntry {
                name: def.name.clone(),
            });
        }

        let mut result_attributes = AttrList::new();
        for name in &def.attributes {
            let id = self.store.attributes.register(name)?;
            if !result_attributes.push(id) {
                return Err(CompileError::TooManyAttributes {
                    entry: def.name.clone(),
                });
            }
        }

        let matcher_start = index_u16(self.store.matchers.len(), "matchers")?;
        let mut param_count: u16 = 0;
        self.lower_top(def, &mut param_count)?;
        let matcher_end = index_u16(self.store.matchers.len(), "matchers")?;

        let id = EntryId(index_u16(self.store.entries.len(), "entries")?);
        self.store.entries.push(TemplateEntry {
            name: def.name.clone(),
            matchers: Span {
                start: matcher_start,
                len: matcher_end - matcher_start,
            },
            param_count,
            result_attributes,
        });
        self.store.names.insert(def.name.clone(), id);
        Ok(id)
    }

    /// Consume the builder, freezing the store.
    pub fn finish(self) -> TextStore {
        self.store
    }

    /// Lower a top-level body: literal runs accumulate into chunks that
    /// flush (each with a fresh group) whenever a `\match` interrupts them.
    fn lower_top(&mut self, def: &EntryDef, param_count: &mut u16) -> Result<(), CompileError> {
        let mut chunk = Chunk::default();
        for segment in &def.body {
            if let Segment::Match(arms) = segment {
                if !chunk.is_empty() {
                    let fresh = self.alloc_group()?;
                    self.push_matcher(std::mem::take(&mut chunk), Span::default(), fresh)?;
                }
                self.lower_match(&def.name, arms, param_count)?;
            } else {
                self.lower_flat(&def.name, &mut chunk, std::slice::from_ref(segment), param_count)?;
            }
        }
        if !chunk.is_empty() {
            let fresh = self.alloc_group()?;
            self.push_matcher(chunk, Span::default(), fresh)?;
        }
        Ok(())
    }

    /// Lower one `\match` construct: every arm becomes a matcher sharing a
    /// freshly allocated group.
    fn lower_match(
        &mut self,
        entry: &str,
        arms: &[MatchArm],
        param_count: &mut u16,
    ) -> Result<(), CompileError> {
        let group = self.alloc_group()?;
        for arm in arms {
            let mut chunk = Chunk::default();
            self.lower_flat(entry, &mut chunk, &arm.body, param_count)?;
            let keys = self.push_keys(&arm.conditions, param_count)?;
            self.push_matcher(chunk, keys, group)?;
        }
        Ok(())
    }

    /// Lower segments into a single flat chunk. `\match` cannot appear here.
    fn lower_flat(
        &mut self,
        entry: &str,
        chunk: &mut Chunk,
        segments: &[Segment],
        param_count: &mut u16,
    ) -> Result<(), CompileError> {
        for segment in segments {
            match segment {
                Segment::Literal(text) => chunk.text.extend(text.chars()),
                Segment::Param(p) => {
                    chunk.mark(FormatPayload::Parameter(*p))?;
                    chunk.text.push(FILLER);
                    *param_count = (*param_count).max(u16::from(*p) + 1);
                }
                Segment::Font(name) => {
                    let index = self
                        .store
                        .fonts
                        .iter()
                        .position(|f| f == name)
                        .and_then(|i| u8::try_from(i).ok())
                        .ok_or_else(|| CompileError::UnknownFont {
                            name: name.clone(),
                            entry: entry.to_string(),
                        })?;
                    chunk.mark(FormatPayload::Font(index))?;
                }
                Segment::Italic(inner) => {
                    chunk.mark(FormatPayload::Style(StyleTag::BeginItalic))?;
                    self.lower_flat(entry, chunk, inner, param_count)?;
                    chunk.mark(FormatPayload::Style(StyleTag::EndItalic))?;
                }
                Segment::Match(_) => {
                    return Err(CompileError::NestedMatch {
                        entry: entry.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Append match keys for an arm's conditions, registering attributes.
    fn push_keys(
        &mut self,
        conditions: &[Condition],
        param_count: &mut u16,
    ) -> Result<Span, CompileError> {
        let start = index_u16(self.store.keys.len(), "match keys")?;
        for condition in conditions {
            let required = self.store.attributes.register(&condition.attribute)?;
            self.store.keys.push(MatchKey {
                required,
                param: condition.param,
            });
            *param_count = (*param_count).max(u16::from(condition.param) + 1);
        }
        let end = index_u16(self.store.keys.len(), "match keys")?;
        Ok(Span {
            start,
            len: end - start,
        })
    }

    /// Append a finished chunk as a matcher.
    fn push_matcher(&mut self, chunk: Chunk, keys: Span, group: u16) -> Result<(), CompileError> {
        let text_start = index_u16(self.store.pool.len(), "pool codepoints")?;
        let text_len = index_u16(chunk.text.len(), "codepoints in one chunk")?;
        self.store.pool.extend(chunk.text);
        index_u16(self.store.pool.len(), "pool codepoints")?;

        let marker_start = index_u16(self.store.markers.len(), "format markers")?;
        let marker_len = index_u16(chunk.markers.len(), "format markers in one chunk")?;
        self.store.markers.extend(chunk.markers);
        index_u16(self.store.markers.len(), "format markers")?;

        index_u16(self.store.matchers.len() + 1, "matchers")?;
        self.store.matchers.push(Matcher {
            text: Span {
                start: text_start,
                len: text_len,
            },
            markers: Span {
                start: marker_start,
                len: marker_len,
            },
            keys,
            group,
        });
        Ok(())
    }

    /// Allocate a fresh matcher group id.
    fn alloc_group(&mut self) -> Result<u16, CompileError> {
        let group = self.next_group;
        self.next_group = self
            .next_group
            .checked_add(1)
            .ok_or(CompileError::StoreOverflow {
                what: "matcher groups",
            })?;
        Ok(group)
    }
}

/// Narrow a table index to the store's 16-bit index space.
fn index_u16(value: usize, what: &'static str) -> Result<u16, CompileError> {
    u16::try_from(value).map_err(|_| CompileError::StoreOverflow { what })
}
