//! Entry-definition source parser.
//!
//! Parses source text of the form `name [attr-block] body-block ...` into
//! [`EntryDef`] values. Body blocks support the inline commands `\it{}`,
//! `\font{}`, `\match{}{}…{}`, parameter placeholders `\N`, the `_` joiner,
//! and the literal escapes `\\`, `\{`, `\}`, `\_`.
//!
//! Whitespace normalization happens here, independently inside every nested
//! block: leading/trailing whitespace is trimmed, interior runs collapse to
//! one space (or one newline when the run contains a CR/LF), and a joiner
//! adjacent to a run deletes the run outright.

use winnow::combinator::{preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{Condition, EntryDef, MatchArm, Segment};
use super::error::ParseError;
use crate::suggest::compute_suggestions;

/// Inline command names, used for did-you-mean suggestions.
const COMMANDS: &[&str] = &["it", "font", "match"];

/// Parse an entire source text into entry definitions.
pub fn parse_source(input: &str) -> Result<Vec<EntryDef>, ParseError> {
    let mut rest = input;
    let mut entries = Vec::new();
    skip_ws(&mut rest);
    while !rest.is_empty() {
        let (def, remaining) = parse_entry(input, rest)?;
        entries.push(def);
        rest = remaining;
        skip_ws(&mut rest);
    }
    Ok(entries)
}

/// Parse a single entry definition, returning it together with the
/// remaining unparsed source. Parsing stops at the start of the next entry.
pub fn parse_entry<'i>(full: &str, input: &'i str) -> Result<(EntryDef, &'i str), ParseError> {
    let mut rest = input;
    skip_ws(&mut rest);

    let name = match identifier.parse_next(&mut rest) {
        Ok(name) => name.to_string(),
        Err(_) => {
            return Err(syntax(full, rest, "expected entry name"));
        }
    };
    skip_ws(&mut rest);

    // An entry has one or two blocks. When two blocks follow the name, the
    // first is the attribute block; a lone block is the body.
    let mut attributes = Vec::new();
    let before_attrs = rest;
    if let Ok(names) = attr_block.parse_next(&mut rest) {
        let mut after = rest;
        skip_ws(&mut after);
        if after.starts_with('{') {
            attributes = names;
            rest = after;
        } else {
            rest = before_attrs;
        }
    } else {
        rest = before_attrs;
    }

    let body = parse_body_block(full, &mut rest)?;
    Ok((
        EntryDef {
            name,
            attributes,
            body,
        },
        rest,
    ))
}

/// Parse a `{N1.attrA N2.attrB ...}` condition block, returning the parsed
/// conditions and the remaining input after the closing brace.
pub fn parse_conditions<'i>(
    full: &str,
    input: &'i str,
) -> Result<(Vec<Condition>, &'i str), ParseError> {
    let mut rest = input;
    if !rest.starts_with('{') {
        return Err(syntax(full, rest, "expected '{' to open a condition block"));
    }
    let open = rest;
    rest = &rest[1..];
    let Some(close) = rest.find(['{', '}']) else {
        return Err(unterminated(full, open));
    };
    if rest.as_bytes()[close] == b'{' {
        return Err(syntax(
            full,
            &rest[close..],
            "unexpected '{' inside a condition block",
        ));
    }
    let inner = &rest[..close];
    let after = &rest[close + 1..];

    let conditions = parse_condition_list(full, inner)?;
    Ok((conditions, after))
}

/// Parse the space-separated `N.attr` pairs inside a condition block.
fn parse_condition_list(full: &str, inner: &str) -> Result<Vec<Condition>, ParseError> {
    let mut content = inner;
    let raw = match condition_pairs.parse_next(&mut content) {
        Ok(raw) if content.trim().is_empty() => raw,
        _ => {
            return Err(syntax(full, content, "malformed condition, expected 'N.attr'"));
        }
    };

    let mut conditions = Vec::with_capacity(raw.len());
    for (index, attribute) in raw {
        let param = checked_param_index(full, inner, index)?;
        conditions.push(Condition { param, attribute });
    }
    Ok(conditions)
}

/// Parse a `{ body }` block into normalized segments.
fn parse_body_block(full: &str, rest: &mut &str) -> Result<Vec<Segment>, ParseError> {
    if !rest.starts_with('{') {
        return Err(syntax(full, rest, "expected '{' to open a body block"));
    }
    let open = *rest;
    *rest = &rest[1..];
    let items = scan_items(full, rest, open)?;
    Ok(normalize(items))
}

/// Raw scanner output, before whitespace normalization.
enum Item {
    Text(String),
    Ws { newline: bool },
    Joiner,
    Seg(Segment),
}

/// Scan body content up to and including the matching `}`.
fn scan_items(full: &str, rest: &mut &str, open: &str) -> Result<Vec<Item>, ParseError> {
    let mut items = Vec::new();
    loop {
        let Some(c) = rest.chars().next() else {
            return Err(unterminated(full, open));
        };
        match c {
            '}' => {
                *rest = &rest[1..];
                return Ok(items);
            }
            '{' => {
                return Err(syntax(full, rest, "unexpected '{' in body text"));
            }
            '\\' => {
                *rest = &rest[1..];
                scan_command(full, rest, &mut items)?;
            }
            '_' => {
                *rest = &rest[1..];
                items.push(Item::Joiner);
            }
            c if c.is_whitespace() => {
                let run: &str = take_while(1.., char::is_whitespace)
                    .parse_next(rest)
                    .map_err(|_: ErrMode<ContextError>| syntax(full, rest, "expected whitespace"))?;
                items.push(Item::Ws {
                    newline: run.contains(['\r', '\n']),
                });
            }
            c => {
                *rest = &rest[c.len_utf8()..];
                push_text(&mut items, c);
            }
        }
    }
}

/// Scan one inline command, with the leading `\` already consumed.
fn scan_command(full: &str, rest: &mut &str, items: &mut Vec<Item>) -> Result<(), ParseError> {
    let Some(c) = rest.chars().next() else {
        return Err(syntax(full, rest, "dangling '\\' at end of input"));
    };

    // Literal escapes.
    if matches!(c, '\\' | '{' | '}' | '_') {
        *rest = &rest[1..];
        push_text(items, c);
        return Ok(());
    }

    // `\N` parameter placeholder, 1-based.
    if c.is_ascii_digit() {
        let at = *rest;
        let digits: &str = take_while(1.., |c: char| c.is_ascii_digit())
            .parse_next(rest)
            .map_err(|_: ErrMode<ContextError>| syntax(full, rest, "expected digits"))?;
        let index: u32 = digits
            .parse()
            .map_err(|_| syntax(full, at, "parameter index out of range"))?;
        let param = checked_param_index(full, at, index)?;
        items.push(Item::Seg(Segment::Param(param)));
        return Ok(());
    }

    let at = *rest;
    let name = match identifier.parse_next(rest) {
        Ok(name) => name,
        Err(_) => {
            return Err(syntax(full, rest, "expected command name after '\\'"));
        }
    };
    match name {
        "it" => {
            if !rest.starts_with('{') {
                return Err(syntax(full, rest, "expected '{' after '\\it'"));
            }
            let open = *rest;
            *rest = &rest[1..];
            let inner = scan_items(full, rest, open)?;
            items.push(Item::Seg(Segment::Italic(normalize(inner))));
        }
        "font" => {
            let font = scan_font_block(full, rest)?;
            items.push(Item::Seg(Segment::Font(font)));
        }
        "match" => {
            let arms = scan_match_blocks(full, rest)?;
            items.push(Item::Seg(Segment::Match(arms)));
        }
        other => {
            let (line, column) = calculate_position(full, at);
            return Err(ParseError::UnknownCommand {
                name: other.to_string(),
                line,
                column,
                suggestions: compute_suggestions(other, COMMANDS.iter().copied()),
            });
        }
    }
    Ok(())
}

/// Scan the `{name}` block of a `\font` command.
fn scan_font_block(full: &str, rest: &mut &str) -> Result<String, ParseError> {
    if !rest.starts_with('{') {
        return Err(syntax(full, rest, "expected '{' after '\\font'"));
    }
    *rest = &rest[1..];
    skip_ws(rest);
    let name = match font_name.parse_next(rest) {
        Ok(name) => name.to_string(),
        Err(_) => {
            return Err(syntax(full, rest, "expected font name"));
        }
    };
    skip_ws(rest);
    if !rest.starts_with('}') {
        return Err(syntax(full, rest, "expected '}' after font name"));
    }
    *rest = &rest[1..];
    Ok(name)
}

/// Scan the block sequence of a `\match` command: `{cond}{alt}…` pairs,
/// the fallback written as an empty `{}` condition. Blocks are adjacent;
/// the first character that is not `{` ends the sequence.
fn scan_match_blocks(full: &str, rest: &mut &str) -> Result<Vec<MatchArm>, ParseError> {
    let at = *rest;
    let mut arms = Vec::new();
    while rest.starts_with('{') {
        let (conditions, after) = parse_conditions(full, rest)?;
        *rest = after;

        if !rest.starts_with('{') {
            return Err(syntax(full, rest, "'\\match' condition without an alternative"));
        }
        let body = parse_body_block(full, rest)?;
        arms.push(MatchArm { conditions, body });
    }
    if arms.is_empty() {
        return Err(syntax(full, at, "'\\match' requires at least one alternative"));
    }
    Ok(arms)
}

/// Apply whitespace normalization to scanned items.
fn normalize(items: Vec<Item>) -> Vec<Segment> {
    // Joiners delete adjacent whitespace runs, then disappear.
    let mut cleaned: Vec<Item> = Vec::with_capacity(items.len());
    let mut eat_ws = false;
    for item in items {
        match item {
            Item::Joiner => {
                if matches!(cleaned.last(), Some(Item::Ws { .. })) {
                    cleaned.pop();
                }
                eat_ws = true;
            }
            Item::Ws { .. } => {
                if eat_ws {
                    eat_ws = false;
                } else {
                    cleaned.push(item);
                }
            }
            other => {
                eat_ws = false;
                cleaned.push(other);
            }
        }
    }

    // Trim block-leading and block-trailing runs.
    while matches!(cleaned.first(), Some(Item::Ws { .. })) {
        cleaned.remove(0);
    }
    while matches!(cleaned.last(), Some(Item::Ws { .. })) {
        cleaned.pop();
    }

    // Collapse runs and merge adjacent literals.
    let mut out: Vec<Segment> = Vec::with_capacity(cleaned.len());
    for item in cleaned {
        match item {
            Item::Text(s) => push_literal(&mut out, &s),
            Item::Ws { newline } => push_literal(&mut out, if newline { "\n" } else { " " }),
            Item::Seg(seg) => out.push(seg),
            Item::Joiner => {}
        }
    }
    out
}

/// Append a character to the trailing text item, or start a new one.
fn push_text(items: &mut Vec<Item>, c: char) {
    if let Some(Item::Text(text)) = items.last_mut() {
        text.push(c);
    } else {
        items.push(Item::Text(c.to_string()));
    }
}

/// Append literal text to the output, merging with a trailing literal.
fn push_literal(out: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Literal(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Segment::Literal(text.to_string()));
    }
}

/// Validate a 1-based parameter index from source.
fn checked_param_index(full: &str, at: &str, index: u32) -> Result<u8, ParseError> {
    if index == 0 {
        let (line, column) = calculate_position(full, at);
        return Err(ParseError::InvalidParameterIndex {
            index,
            line,
            column,
        });
    }
    if index > 256 {
        return Err(syntax(full, at, "parameter index out of range"));
    }
    Ok((index - 1) as u8)
}

// -- winnow token parsers ----------------------------------------------------

/// Skip whitespace between entries and tokens.
fn skip_ws(input: &mut &str) {
    let _: Result<&str, ErrMode<ContextError>> =
        take_while(0.., char::is_whitespace).parse_next(input);
}

/// Parse an identifier (entry, attribute, command, or font name).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse a font name: identifier characters plus spaces are handled by the
/// caller, so this accepts identifier characters and hyphens.
fn font_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    })
    .parse_next(input)
}

/// Parse an attribute block: `{ attr1 attr2 ... }`.
fn attr_block(input: &mut &str) -> ModalResult<Vec<String>> {
    let _ = '{'.parse_next(input)?;
    let _ = ws0.parse_next(input)?;
    let names: Vec<&str> = separated(0.., identifier, ws1).parse_next(input)?;
    let _ = ws0.parse_next(input)?;
    let _ = '}'.parse_next(input)?;
    Ok(names.into_iter().map(str::to_string).collect())
}

/// Parse the `N.attr` pairs of a condition block.
fn condition_pairs(input: &mut &str) -> ModalResult<Vec<(u32, String)>> {
    preceded(
        ws0,
        repeat(0.., terminated(condition_pair, ws0)),
    )
    .parse_next(input)
}

/// Parse one `N.attr` pair.
fn condition_pair(input: &mut &str) -> ModalResult<(u32, String)> {
    let digits: &str = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let index: u32 = digits
        .parse()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))?;
    let _ = '.'.parse_next(input)?;
    let attr = identifier.parse_next(input)?;
    Ok((index, attr.to_string()))
}

/// Parse optional whitespace.
fn ws0<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}

/// Parse required whitespace.
fn ws1<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., char::is_whitespace).parse_next(input)
}

// -- error helpers -----------------------------------------------------------

/// Build a syntax error at the position `remaining` points into `original`.
fn syntax(original: &str, remaining: &str, message: &str) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    ParseError::Syntax {
        line,
        column,
        message: message.to_string(),
    }
}

/// Build an unterminated-block error at the opening brace.
fn unterminated(original: &str, open: &str) -> ParseError {
    let (line, column) = calculate_position(original, open);
    ParseError::UnterminatedBlock { line, column }
}

/// Calculate line and column from original input and remaining input.
/// `remaining` must be a subslice of `original`.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = (remaining.as_ptr() as usize)
        .saturating_sub(original.as_ptr() as usize)
        .min(original.len());
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}
