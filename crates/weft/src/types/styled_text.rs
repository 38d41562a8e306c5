use std::fmt::{Display, Formatter, Result as FmtResult};

use bon::Builder;

use super::{AttrList, FormatMarker};

/// The result of instantiating a template entry: flattened text, its ordered
/// format markers, and the grammatical attributes the result itself carries.
///
/// This is the one type that crosses the engine/renderer boundary. Marker
/// positions are exact character offsets into `text`. The attribute list
/// comes from the entry's attribute block and lets an instance serve as a
/// parameter to an enclosing call (e.g. a noun entry tagged `masc` matched
/// by a sentence entry's `\match{1.masc}…`).
///
/// # Example
///
/// ```
/// use weft::{AttrId, StyledText};
///
/// let noun = StyledText::builder()
///     .text("carte".to_string())
///     .attributes([AttrId::from_raw(12)].into_iter().collect())
///     .build();
///
/// assert_eq!(noun.to_string(), "carte");
/// assert!(noun.attributes.contains(AttrId::from_raw(12)));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct StyledText {
    /// The flattened text.
    #[builder(default)]
    pub text: String,

    /// Format markers, ordered by position.
    #[builder(default)]
    pub markers: Vec<FormatMarker>,

    /// Attributes this instance carries.
    #[builder(default)]
    pub attributes: AttrList,
}

impl StyledText {
    /// An empty instance with no text, markers, or attributes.
    pub fn empty() -> StyledText {
        StyledText::default()
    }

    /// A plain unformatted, unattributed instance.
    pub fn plain(text: impl Into<String>) -> StyledText {
        StyledText::builder().text(text.into()).build()
    }

    /// The text length in characters (the unit marker positions count).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this instance carries the given attribute.
    pub fn has_attribute(&self, id: crate::AttrId) -> bool {
        self.attributes.contains(id)
    }
}

impl Display for StyledText {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}

impl From<StyledText> for String {
    fn from(instance: StyledText) -> String {
        instance.text
    }
}
