//! Locale management: the user-facing front-end over store and classifier.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;

use crate::engine::NoMatchPolicy;
use crate::engine::classifier::Classifier;
use crate::engine::error::{EvalError, LoadError};
use crate::engine::instantiate::instantiate;
use crate::store::{EntryId, StoreBuilder, TextStore};
use crate::suggest::compute_suggestions;
use crate::types::{StyledText, Value};

/// User-facing locale management for compiled text entries.
///
/// A `Locale` owns at most one active compiled store plus the matching
/// plural classifier; both are replaced as a unit. Loading builds the new
/// store completely before swapping it in, so a failed load keeps the
/// previously active store. The active store is read-only: `instantiate`
/// takes `&self` and many calls may read it concurrently, as long as
/// reloads are serialized against them.
///
/// # Example
///
/// ```
/// use weft::{Locale, args};
///
/// let mut locale = Locale::builder().language("en").build();
/// locale
///     .load_source(r"cards { \match{1.one}{\1 card}{}{\1 cards} }")
///     .unwrap();
///
/// let one = locale.instantiate("cards", &args![1]).unwrap();
/// assert_eq!(one.to_string(), "1 card");
/// let many = locale.instantiate("cards", &args![3]).unwrap();
/// assert_eq!(many.to_string(), "3 cards");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Locale {
    /// Current language code (e.g. "en", "ru", "de").
    #[builder(default = "en".to_string())]
    language: String,

    /// Font name table compiled sources resolve `\font{}` against.
    #[builder(default)]
    fonts: Vec<String>,

    /// What to do when no alternative of a conditioned group matches.
    #[builder(default)]
    no_match: NoMatchPolicy,

    /// The active compiled store, replaced wholesale on every load.
    #[builder(skip)]
    store: Option<TextStore>,

    /// Classifier matching the store's language; swapped with the store.
    #[builder(skip)]
    classifier: Option<Classifier>,

    /// Source path for reload support; `None` for string-loaded sources.
    #[builder(skip)]
    loaded_path: Option<PathBuf>,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::builder().build()
    }
}

impl Locale {
    /// Create a new locale with default settings (English).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new locale with the specified language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Locale::builder().language(language.into()).build()
    }

    /// Get the current language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the current language.
    ///
    /// Swaps the plural classifier immediately; entry sources for the new
    /// language must be loaded separately (the store is rebuilt wholesale on
    /// a locale change, never patched).
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        if self.store.is_some() {
            self.classifier = Some(Classifier::new(&self.language));
        }
    }

    /// The font name table this locale compiles against.
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    /// The active compiled store, if any.
    pub fn store(&self) -> Option<&TextStore> {
        self.store.as_ref()
    }

    /// Number of compiled entries in the active store.
    pub fn entry_count(&self) -> usize {
        self.store.as_ref().map_or(0, TextStore::entry_count)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Compile entry definitions from a string and activate the result.
    ///
    /// The whole store is rebuilt: previously loaded entries are replaced,
    /// and the attribute registry starts fresh. On error the previously
    /// active store stays in place. Returns the number of entries compiled.
    pub fn load_source(&mut self, source: &str) -> Result<usize, LoadError> {
        self.loaded_path = None;
        let pseudo_path = PathBuf::from(format!("<{}>", self.language));
        self.load_internal(source, pseudo_path)
    }

    /// Compile entry definitions from a file and activate the result.
    ///
    /// The path is remembered for [`reload`](Locale::reload).
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let count = self.load_internal(&source, path.to_path_buf())?;
        self.loaded_path = Some(path.to_path_buf());
        Ok(count)
    }

    /// Hot-reload from the original file path.
    ///
    /// Fails with [`LoadError::NoPathForReload`] when the active store was
    /// loaded from a string.
    pub fn reload(&mut self) -> Result<usize, LoadError> {
        let path = self
            .loaded_path
            .clone()
            .ok_or_else(|| LoadError::NoPathForReload {
                language: self.language.clone(),
            })?;
        self.load_file(path)
    }

    /// Build a fresh store and swap it in on success.
    fn load_internal(&mut self, source: &str, path: PathBuf) -> Result<usize, LoadError> {
        let mut builder = StoreBuilder::new(self.fonts.clone());
        let count = builder
            .add_source(source)
            .map_err(|e| LoadError::Compile { path, source: e })?;
        self.store = Some(builder.finish());
        self.classifier = Some(Classifier::new(&self.language));
        Ok(count)
    }

    // =========================================================================
    // Instantiation
    // =========================================================================

    /// Look up the id of an entry by name, for callers that cache ids.
    ///
    /// Ids are invalidated by the next load.
    pub fn text_id(&self, name: &str) -> Option<EntryId> {
        self.store.as_ref().and_then(|s| s.entry_id(name))
    }

    /// Instantiate an entry by name against call parameters.
    pub fn instantiate(&self, name: &str, params: &[Value]) -> Result<StyledText, EvalError> {
        let store = self.store.as_ref().ok_or(EvalError::NoStore)?;
        let id = store.entry_id(name).ok_or_else(|| {
            let names = store.entries().map(|(_, e)| e.name.as_str());
            EvalError::EntryNotFound {
                name: name.to_string(),
                suggestions: compute_suggestions(name, names),
            }
        })?;
        self.instantiate_by_id(id, params)
    }

    /// Instantiate an entry by cached id against call parameters.
    pub fn instantiate_by_id(
        &self,
        id: EntryId,
        params: &[Value],
    ) -> Result<StyledText, EvalError> {
        let store = self.store.as_ref().ok_or(EvalError::NoStore)?;
        let classifier = self.classifier.as_ref().ok_or(EvalError::NoStore)?;
        instantiate(store, classifier, id, params, self.no_match)
    }
}
