use serde::{Deserialize, Serialize};

/// A grammatical attribute id.
///
/// Attributes tag text with grammatical categories: the twelve predefined
/// plural categories (cardinal and ordinal `zero`/`one`/`two`/`few`/`many`/
/// `other`) plus custom categories registered by name (gender, case, article
/// hints). Ids are stored as `i8` with `-1` reserved as the "no attribute"
/// sentinel, so at most 116 custom attributes can be registered.
///
/// # Example
///
/// ```
/// use weft::AttrId;
///
/// assert_eq!(AttrId::ONE.raw(), 1);
/// assert_eq!(AttrId::ORD_OTHER.raw(), 11);
/// assert!(AttrId::NONE.is_none());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttrId(i8);

impl AttrId {
    /// The "no attribute" sentinel, also the attribute-list terminator.
    pub const NONE: AttrId = AttrId(-1);

    pub const ZERO: AttrId = AttrId(0);
    pub const ONE: AttrId = AttrId(1);
    pub const TWO: AttrId = AttrId(2);
    pub const FEW: AttrId = AttrId(3);
    pub const MANY: AttrId = AttrId(4);
    pub const OTHER: AttrId = AttrId(5);

    pub const ORD_ZERO: AttrId = AttrId(6);
    pub const ORD_ONE: AttrId = AttrId(7);
    pub const ORD_TWO: AttrId = AttrId(8);
    pub const ORD_FEW: AttrId = AttrId(9);
    pub const ORD_MANY: AttrId = AttrId(10);
    pub const ORD_OTHER: AttrId = AttrId(11);

    /// First id available for custom attributes.
    pub const FIRST_CUSTOM: i8 = 12;

    /// Wrap a raw id. Negative values other than `-1` are not produced by
    /// the registry and are treated as `NONE`.
    pub const fn from_raw(raw: i8) -> AttrId {
        if raw < 0 { AttrId::NONE } else { AttrId(raw) }
    }

    /// The raw signed id (`-1` for `NONE`).
    pub const fn raw(self) -> i8 {
        self.0
    }

    /// Whether this is the `NONE` sentinel.
    pub const fn is_none(self) -> bool {
        self.0 < 0
    }

    /// Whether this id is one of the twelve predefined plural categories.
    pub const fn is_predefined(self) -> bool {
        self.0 >= 0 && self.0 < Self::FIRST_CUSTOM
    }
}

impl std::fmt::Display for AttrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed list of up to eight attribute ids, terminated by [`AttrId::NONE`].
///
/// This is the attribute storage used both by compiled entries (the
/// attributes an instance of the entry carries) and by instantiated
/// [`StyledText`](crate::StyledText) values (so they can serve as parameters
/// to an enclosing call).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrList {
    slots: [AttrId; AttrList::CAPACITY],
    len: u8,
}

impl Default for AttrList {
    /// An empty list; unoccupied slots hold the `NONE` sentinel, never id 0.
    fn default() -> AttrList {
        AttrList::new()
    }
}

impl AttrList {
    /// Maximum number of attributes one entry or instance can carry.
    pub const CAPACITY: usize = 8;

    /// An empty list (all slots `NONE`).
    pub const fn new() -> AttrList {
        AttrList {
            slots: [AttrId::NONE; AttrList::CAPACITY],
            len: 0,
        }
    }

    /// Append an id. Returns `false` when all eight slots are occupied.
    #[must_use]
    pub fn push(&mut self, id: AttrId) -> bool {
        if id.is_none() {
            return true;
        }
        let Some(slot) = self.slots.get_mut(self.len as usize) else {
            return false;
        };
        *slot = id;
        self.len += 1;
        true
    }

    /// The occupied slots, in insertion order.
    pub fn as_slice(&self) -> &[AttrId] {
        &self.slots[..self.len as usize]
    }

    /// The full fixed array, including `NONE` terminator slots.
    pub fn raw_slots(&self) -> &[AttrId; AttrList::CAPACITY] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the list contains `id`.
    pub fn contains(&self, id: AttrId) -> bool {
        !id.is_none() && self.as_slice().contains(&id)
    }
}

impl FromIterator<AttrId> for AttrList {
    /// Collect up to eight ids; extra ids are dropped. Use
    /// [`AttrList::push`] when overflow must be detected.
    fn from_iter<I: IntoIterator<Item = AttrId>>(iter: I) -> AttrList {
        let mut list = AttrList::new();
        for id in iter {
            if !list.push(id) {
                break;
            }
        }
        list
    }
}

impl<'a> IntoIterator for &'a AttrList {
    type Item = AttrId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, AttrId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter().copied()
    }
}
