//! Attribute name registry.

use std::collections::HashMap;

use crate::store::CompileError;
use crate::types::AttrId;

/// Predefined attribute names, in id order 0..12.
pub const PREDEFINED_ATTRIBUTES: [&str; 12] = [
    "zero", "one", "two", "few", "many", "other", "ord_zero", "ord_one", "ord_two", "ord_few",
    "ord_many", "ord_other",
];

/// Bijective name ↔ id mapping for grammatical attributes.
///
/// Seeded with the twelve predefined plural categories. Unknown names are
/// assigned the next unused id starting at 12, monotonically increasing;
/// re-registering a known name returns the existing id. There is no removal:
/// the registry lives exactly as long as the store it belongs to, and a
/// recompilation starts from a fresh registry.
///
/// # Example
///
/// ```
/// use weft::{AttrId, AttributeRegistry};
///
/// let mut registry = AttributeRegistry::new();
/// assert_eq!(registry.register("other").unwrap(), AttrId::OTHER);
///
/// let masc = registry.register("masc").unwrap();
/// assert_eq!(masc.raw(), AttrId::FIRST_CUSTOM);
/// assert_eq!(registry.register("masc").unwrap(), masc);
/// assert_eq!(registry.name(masc), Some("masc"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRegistry {
    /// Names indexed by id.
    names: Vec<String>,
    /// Reverse lookup.
    ids: HashMap<String, AttrId>,
}

impl AttributeRegistry {
    /// Create a registry seeded with the predefined plural categories.
    pub fn new() -> AttributeRegistry {
        let names: Vec<String> = PREDEFINED_ATTRIBUTES
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        let ids = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), AttrId::from_raw(id as i8)))
            .collect();
        AttributeRegistry { names, ids }
    }

    /// Look up a name, registering it if unknown.
    ///
    /// Fails with [`CompileError::AttributeOverflow`] when the next id would
    /// leave the signed 8-bit range.
    pub fn register(&mut self, name: &str) -> Result<AttrId, CompileError> {
        if let Some(id) = self.ids.get(name) {
            return Ok(*id);
        }
        let next = self.names.len();
        let raw = i8::try_from(next).map_err(|_| CompileError::AttributeOverflow {
            name: name.to_string(),
        })?;
        let id = AttrId::from_raw(raw);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a name without registering it.
    pub fn lookup(&self, name: &str) -> Option<AttrId> {
        self.ids.get(name).copied()
    }

    /// The name for an id, if registered.
    pub fn name(&self, id: AttrId) -> Option<&str> {
        if id.is_none() {
            return None;
        }
        self.names.get(id.raw() as usize).map(String::as_str)
    }

    /// Number of registered attributes, predefined ones included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        AttributeRegistry::new()
    }
}
