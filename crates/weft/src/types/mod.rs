mod attribute;
mod marker;
mod styled_text;
mod value;

pub use attribute::{AttrId, AttrList};
pub use marker::{FormatMarker, FormatPayload, StyleTag};
pub use styled_text::StyledText;
pub use value::Value;
