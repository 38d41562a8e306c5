//! The pattern matcher / instantiation engine.
//!
//! Given a compiled entry and concrete parameter values, walks the entry's
//! matcher span one group run at a time, selects among conditioned
//! alternatives, appends the selected chunks (re-basing marker positions by
//! the running output length), and finally splices every parameter in place
//! of its filler character with exact offset arithmetic.

use crate::engine::classifier::Classifier;
use crate::engine::error::EvalError;
use crate::engine::NoMatchPolicy;
use crate::store::{EntryId, Matcher, TextStore};
use crate::types::{AttrList, FormatMarker, FormatPayload, StyledText, Value};

/// Instantiate `id` against `params`, producing a flattened result.
pub(crate) fn instantiate(
    store: &TextStore,
    classifier: &Classifier,
    id: EntryId,
    params: &[Value],
    policy: NoMatchPolicy,
) -> Result<StyledText, EvalError> {
    let entry = store
        .entry(id)
        .ok_or(EvalError::EntryNotFoundById { id })?;

    if params.len() != entry.param_count as usize {
        return Err(EvalError::ParameterCount {
            entry: entry.name.clone(),
            expected: entry.param_count as usize,
            got: params.len(),
        });
    }

    // Primitives become synthetic instances via formatting + classification;
    // nested instances pass through. Each parameter is materialized once and
    // spliced per occurrence.
    let args: Vec<StyledText> = params
        .iter()
        .map(|value| materialize(value, classifier))
        .collect();

    let mut text: Vec<char> = Vec::new();
    let mut markers: Vec<FormatMarker> = Vec::new();

    let matchers = store.matchers(entry.matchers);
    let mut i = 0;
    while i < matchers.len() {
        let group = matchers[i].group;
        let mut j = i + 1;
        while j < matchers.len() && matchers[j].group == group {
            j += 1;
        }

        match select(store, &matchers[i..j], &args, &entry.name)? {
            Some(matcher) => {
                let base = text.len();
                text.extend_from_slice(store.chunk_text(matcher));
                for marker in store.chunk_markers(matcher) {
                    markers.push(FormatMarker::new(
                        base + marker.offset as usize,
                        marker.payload,
                    ));
                }
            }
            None => {
                if policy == NoMatchPolicy::Error {
                    return Err(EvalError::NoMatchingAlternative {
                        entry: entry.name.clone(),
                    });
                }
                // Skip: the run contributes nothing.
            }
        }
        i = j;
    }

    // Splice parameters. Markers are in position order; inserted markers
    // come from already-instantiated arguments, so they are skipped rather
    // than re-examined (a nested instance never carries Parameter payloads
    // of its own once instantiated).
    let mut idx = 0;
    while idx < markers.len() {
        if let FormatPayload::Parameter(p) = markers[idx].payload {
            let arg = args
                .get(p as usize)
                .ok_or_else(|| EvalError::ParameterIndexOutOfRange {
                    entry: entry.name.clone(),
                    index: p as usize,
                })?;
            let inserted = splice(&mut text, &mut markers, idx, arg);
            idx += 1 + inserted;
        } else {
            idx += 1;
        }
    }

    Ok(StyledText {
        text: text.into_iter().collect(),
        markers,
        attributes: entry.result_attributes,
    })
}

/// Select the member of a group run to emit.
///
/// A singleton run with no keys is unconditional. Otherwise members are
/// tried in source order and the first whose keys all hold wins; a zero-key
/// member matches by construction and therefore acts as a fallback when
/// placed last. `None` means the run has no matching member.
fn select<'a>(
    store: &TextStore,
    run: &'a [Matcher],
    args: &[StyledText],
    entry: &str,
) -> Result<Option<&'a Matcher>, EvalError> {
    if run.len() == 1 && run[0].keys.is_empty() {
        return Ok(Some(&run[0]));
    }

    for matcher in run {
        let mut holds = true;
        for key in store.match_keys(matcher) {
            let arg = args
                .get(key.param as usize)
                .ok_or_else(|| EvalError::ParameterIndexOutOfRange {
                    entry: entry.to_string(),
                    index: key.param as usize,
                })?;
            if !arg.attributes.contains(key.required) {
                holds = false;
                break;
            }
        }
        if holds {
            return Ok(Some(matcher));
        }
    }
    Ok(None)
}

/// Splice `arg` in place of the filler character under `markers[at]`.
///
/// Replaces the filler with the argument's text, rewrites the marker to a
/// substitution mark, inserts the argument's own markers shifted to the
/// splice point, and shifts every later marker by the net length delta.
/// Returns the number of markers inserted.
fn splice(
    text: &mut Vec<char>,
    markers: &mut Vec<FormatMarker>,
    at: usize,
    arg: &StyledText,
) -> usize {
    let position = markers[at].position;
    let chars: Vec<char> = arg.text.chars().collect();
    let delta = chars.len() as isize - 1;

    text.splice(position..position + 1, chars);
    markers[at].payload = FormatPayload::Substitution;

    // Later markers sit at or after the filler; shift them by the delta.
    for marker in &mut markers[at + 1..] {
        marker.position = (marker.position as isize + delta) as usize;
    }

    let inserted: Vec<FormatMarker> = arg
        .markers
        .iter()
        .map(|marker| FormatMarker::new(marker.position + position, marker.payload))
        .collect();
    let count = inserted.len();
    markers.splice(at + 1..at + 1, inserted);
    count
}

/// Wrap a call parameter into a synthetic instance.
///
/// Numbers are formatted and classified with both the cardinal and ordinal
/// rules so conditions may test either category. Strings that parse as
/// integers are classified the same way; other strings carry no attributes.
/// Floats classify by their integer part.
fn materialize(value: &Value, classifier: &Classifier) -> StyledText {
    match value {
        Value::Number(n) => attributed(n.to_string(), number_attrs(*n, classifier)),
        Value::Float(f) => attributed(f.to_string(), number_attrs(*f as i64, classifier)),
        Value::String(s) => match s.parse::<i64>() {
            Ok(n) => attributed(s.clone(), number_attrs(n, classifier)),
            Err(_) => StyledText::plain(s.clone()),
        },
        Value::Text(t) => t.clone(),
    }
}

fn number_attrs(n: i64, classifier: &Classifier) -> AttrList {
    [classifier.cardinal(n), classifier.ordinal(n)]
        .into_iter()
        .collect()
}

fn attributed(text: String, attributes: AttrList) -> StyledText {
    StyledText::builder().text(text).attributes(attributes).build()
}
