use serde::{Deserialize, Serialize};

/// The payload of a format marker.
///
/// A closed sum over the four marker kinds the engine produces. The renderer
/// is expected to match exhaustively; no further kinds are planned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatPayload {
    /// Switch to the named font at this position. The index points into the
    /// font name table the store was compiled with.
    Font(u8),

    /// A pending parameter substitution: the filler character at this
    /// position is replaced by parameter `N` (0-based) at instantiation
    /// time. Never present in instantiation output.
    Parameter(u8),

    /// Marks the start of text that was spliced in for a parameter. This is
    /// what a [`Parameter`](FormatPayload::Parameter) marker becomes once
    /// its substitution has been performed.
    Substitution,

    /// An inline character-formatting boundary, e.g. the start or end of an
    /// italic span.
    Style(StyleTag),
}

/// Inline character-formatting boundary kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleTag {
    BeginItalic,
    EndItalic,
}

/// A format marker in instantiated output: an exact character offset into
/// the produced text plus a [`FormatPayload`].
///
/// Offsets count Unicode scalar values, not bytes. Markers are ordered by
/// position; markers at equal positions keep their emission order (an end
/// tag precedes a begin tag at the same offset when two spans abut).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatMarker {
    pub position: usize,
    pub payload: FormatPayload,
}

impl FormatMarker {
    pub fn new(position: usize, payload: FormatPayload) -> FormatMarker {
        FormatMarker { position, payload }
    }
}
