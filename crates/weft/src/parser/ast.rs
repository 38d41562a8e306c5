//! Public AST types for entry definitions.
//!
//! These types are public to enable external tooling (linters, editors).
//! Attribute names are kept as strings at this stage; id assignment happens
//! when the definitions are lowered into a store.

/// One parsed entry definition: `name [attr-block] body-block`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDef {
    pub name: String,
    /// Attribute names from the optional attr-block, in source order.
    pub attributes: Vec<String>,
    pub body: Vec<Segment>,
}

/// A segment of a body block, after whitespace normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text (whitespace already collapsed).
    Literal(String),
    /// `\it{ ... }` — an inline italic span.
    Italic(Vec<Segment>),
    /// `\N` — a parameter placeholder, 0-based index.
    Param(u8),
    /// `\font{name}` — switch to a named font.
    Font(String),
    /// `\match{cond}{alt}…` — a conditioned alternative group.
    Match(Vec<MatchArm>),
}

/// One alternative of a `\match` group.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    /// Conditions that must all hold, empty for the fallback arm.
    pub conditions: Vec<Condition>,
    pub body: Vec<Segment>,
}

/// One `N.attr` condition: parameter `param` (0-based) must carry the named
/// attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub param: u8,
    pub attribute: String,
}
