use crate::text::is_word_char;
use crate::Map;
use itertools::Itertools;

/// Shortest token considered for fuzzy matching.
const MIN_TOKEN_LEN: usize = 3;

/// Similarity above which a candidate is good enough to stop looking.
const NEAR_PERFECT: f32 = 0.95;

/// An input token that resembles a word.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarWord {
    /// The token, as found in the (lowercased) input.
    pub word: String,
    /// The word it resembles.
    pub original: String,
    /// In `[0, 1]`.
    pub similarity: f32,
    /// Only reported by [`find_by_levenshtein_distance`].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub distance: Option<usize>,
}

/// Case-insensitive edit distance, in characters.
///
/// ```
/// assert_eq!(saring::levenshtein_distance("Anjing", "anjeng"), 1);
/// ```
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// `1 - distance / longer length`. Two empty strings are identical, and an empty string has
/// nothing in common with a non-empty one.
pub fn string_similarity(a: &str, b: &str) -> f32 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f32 / longer as f32
}

/// Whether the character multisets of `a` and `b` differ by at most `2 * max_distance`, which
/// is necessary (but not sufficient) for an edit distance of at most `max_distance`.
pub(crate) fn is_character_count_similar(a: &str, b: &str, max_distance: usize) -> bool {
    let mut counts = Map::<char, isize>::default();
    for c in a.chars() {
        *counts.entry(c).or_default() += 1;
    }
    for c in b.chars() {
        *counts.entry(c).or_default() -= 1;
    }
    counts.values().map(|n| n.unsigned_abs()).sum::<usize>() <= max_distance.saturating_mul(2)
}

/// Lowercased whitespace-separated tokens, without surrounding punctuation, long enough to be
/// worth comparing.
fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !is_word_char(c)))
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_owned)
        .collect()
}

fn first_char(word: &str) -> Option<char> {
    word.chars().next().and_then(|c| c.to_lowercase().next())
}

/// For each token of `text`, the most similar of `words` with a similarity of at least
/// `threshold`, if any.
///
/// Candidates share the token's first letter or an alphabetically adjacent one (to tolerate a
/// typo there), and are within two characters of its length.
///
/// ```
/// let found = saring::find_by_similarity("dasar anjeng", ["anjing", "babi"], 0.8);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].original, "anjing");
/// ```
pub fn find_by_similarity<'a>(
    text: &str,
    words: impl IntoIterator<Item = &'a str>,
    threshold: f32,
) -> Vec<SimilarWord> {
    let mut by_first_char = Map::<char, Vec<&str>>::default();
    for word in words {
        if let Some(c) = first_char(word) {
            by_first_char.entry(c).or_default().push(word);
        }
    }

    let mut ret = Vec::new();
    for token in tokens(text) {
        let first = match first_char(&token) {
            Some(c) => c,
            None => continue,
        };
        let len = token.chars().count();

        // Exact first letter takes priority over neighbors.
        let neighbors = [
            Some(first),
            (first as u32).checked_sub(1).and_then(char::from_u32),
            char::from_u32(first as u32 + 1),
        ];
        let candidates = neighbors
            .iter()
            .flatten()
            .filter_map(|c| by_first_char.get(c))
            .flatten()
            .filter(|candidate| len.abs_diff(candidate.chars().count()) <= 2);

        let mut best: Option<SimilarWord> = None;
        for &candidate in candidates {
            let similarity = string_similarity(&token, candidate);
            if similarity >= threshold && best.as_ref().map_or(true, |b| similarity > b.similarity)
            {
                best = Some(SimilarWord {
                    word: token.clone(),
                    original: candidate.to_owned(),
                    similarity,
                    distance: None,
                });
                if similarity > NEAR_PERFECT {
                    break;
                }
            }
        }
        ret.extend(best);
    }
    ret
}

/// For each token of `text`, the most similar of `words` within `max_distance` edits and with a
/// similarity of at least `threshold`, if any.
///
/// Candidates are bucketed by length, then pruned by character counts before computing the edit
/// distance.
pub fn find_by_levenshtein_distance<'a>(
    text: &str,
    words: impl IntoIterator<Item = &'a str>,
    threshold: f32,
    max_distance: usize,
) -> Vec<SimilarWord> {
    let by_len: Map<usize, Vec<&str>> = words
        .into_iter()
        .map(|word| (word.chars().count(), word))
        .into_group_map()
        .into_iter()
        .collect();

    let longest = by_len.keys().copied().max().unwrap_or(0);

    let mut ret = Vec::new();
    for token in tokens(text) {
        let len = token.chars().count();
        let lower = token.to_lowercase();
        let buckets = len.saturating_sub(max_distance).max(MIN_TOKEN_LEN)
            ..=len.saturating_add(max_distance).min(longest);

        let mut best: Option<SimilarWord> = None;
        'buckets: for bucket in buckets {
            for &candidate in by_len.get(&bucket).into_iter().flatten() {
                if !is_character_count_similar(&lower, &candidate.to_lowercase(), max_distance) {
                    continue;
                }
                let distance = levenshtein_distance(&token, candidate);
                if distance > max_distance {
                    continue;
                }
                let similarity = 1.0 - distance as f32 / len.max(bucket) as f32;
                if similarity >= threshold
                    && best.as_ref().map_or(true, |b| similarity > b.similarity)
                {
                    best = Some(SimilarWord {
                        word: token.clone(),
                        original: candidate.to_owned(),
                        similarity,
                        distance: Some(distance),
                    });
                    if distance == 0 || similarity > NEAR_PERFECT {
                        break 'buckets;
                    }
                }
            }
        }
        ret.extend(best);
    }
    ret
}

/// The most similar candidate with a similarity of at least `threshold`. Ties go to the first.
pub fn find_most_similar<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f32,
) -> Option<&'a str> {
    let mut best: Option<(&str, f32)> = None;
    for candidate in candidates {
        let similarity = string_similarity(target, candidate);
        if similarity >= threshold && best.map_or(true, |(_, s)| similarity > s) {
            best = Some((candidate, similarity));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Like [`find_most_similar`], but also requires at most `max_distance` edits, and settles for
/// the first candidate within one edit.
pub fn find_most_similar_with_levenshtein<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f32,
    max_distance: usize,
) -> Option<&'a str> {
    let len = target.chars().count();
    let mut best: Option<(&str, f32, usize)> = None;
    for candidate in candidates {
        let candidate_len = candidate.chars().count();
        if len.abs_diff(candidate_len) > max_distance {
            continue;
        }
        let distance = levenshtein_distance(target, candidate);
        if distance > max_distance {
            continue;
        }
        let similarity = string_similarity(target, candidate);
        if similarity < threshold {
            continue;
        }
        let better = best.map_or(true, |(_, s, d)| similarity > s || distance < d);
        if better {
            best = Some((candidate, similarity, distance));
            if distance <= 1 || similarity > NEAR_PERFECT {
                break;
            }
        }
    }
    best.map(|(candidate, _, _)| candidate)
}
