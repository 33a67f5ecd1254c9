//! ui::suggest
//!
//! "Did you mean" suggestions for mistyped keys.
//!
//! A candidate matches when the characters of the input appear in it in
//! order (case-insensitive). Matches are ranked by the length of the
//! shortest matching span, then its start, then alphabetically.

/// Candidates that fuzzily match `input`, best first.
pub fn suggest<'a, I>(input: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle: Vec<char> = input.to_lowercase().chars().collect();

    let mut ranked: Vec<((usize, usize), &str)> = candidates
        .into_iter()
        .filter_map(|candidate| best_span(&needle, candidate).map(|span| (span, candidate)))
        .collect();

    ranked.sort_by(|(a_span, a), (b_span, b)| {
        (a_span.1 - a_span.0, a_span.0, *a).cmp(&(b_span.1 - b_span.0, b_span.0, *b))
    });

    ranked.into_iter().map(|(_, c)| c.to_string()).collect()
}

/// Shortest `(start, end)` char span of `haystack` containing `needle` as a
/// subsequence.
fn best_span(needle: &[char], haystack: &str) -> Option<(usize, usize)> {
    let hay: Vec<char> = haystack.to_lowercase().chars().collect();
    if needle.is_empty() {
        return Some((0, 0));
    }

    let mut best: Option<(usize, usize)> = None;
    for start in 0..hay.len() {
        if hay[start] != needle[0] {
            continue;
        }
        let mut matched = 1;
        let mut end = start + 1;
        while matched < needle.len() && end < hay.len() {
            if hay[end] == needle[matched] {
                matched += 1;
            }
            end += 1;
        }
        if matched == needle.len() {
            let better = best.map_or(true, |(s, e)| end - start < e - s);
            if better {
                best = Some((start, end));
            }
        }
    }
    best
}
