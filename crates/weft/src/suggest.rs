//! Did-you-mean suggestions for unknown names.

/// Rank `candidates` by Jaro-Winkler similarity to `input` and return the
/// closest matches, best first. Candidates below the similarity threshold
/// are omitted; at most three suggestions are returned.
pub fn compute_suggestions<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    const THRESHOLD: f64 = 0.7;
    const MAX_SUGGESTIONS: usize = 3;

    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| (strsim::jaro_winkler(input, candidate), candidate))
        .filter(|(score, _)| *score >= THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
