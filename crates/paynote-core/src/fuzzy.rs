//! Approximate string similarity on a 0-100 scale
//!
//! The score is a weighted ratio over edit-distance similarities, in the
//! style of common fuzzy matching libraries:
//! - `ratio`: `100 * (1 - indel_distance / (len_a + len_b))`
//! - `partial_ratio`: best `ratio` of the shorter string against every
//!   same-length window of the longer one
//! - token sort / token set variants, which ignore word order and
//!   duplicated words
//!
//! [`weighted_ratio`] picks the best of these, scaling down the partial and
//! token variants so an exact match still outranks a substring match.

use std::collections::BTreeSet;

/// Lowercase, turn non-word characters into spaces, trim.
pub fn preprocess(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Indel-normalized similarity of two strings, compared as-is
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    round(ratio_chars(&a, &b))
}

/// Best [`ratio`] of the shorter string against windows of the longer one
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter == longer {
        return 100;
    }
    if shorter.is_empty() {
        return 0;
    }

    let width = shorter.len();
    let mut best = 0.0_f64;
    for window in longer.windows(width) {
        let score = ratio_chars(&shorter, window);
        if score > 99.5 {
            return 100;
        }
        best = best.max(score);
    }
    round(best)
}

/// [`ratio`] (or [`partial_ratio`]) after sorting each side's words
pub fn token_sort_ratio(a: &str, b: &str, partial: bool) -> u8 {
    let sa = sorted_tokens(a);
    let sb = sorted_tokens(b);
    if partial {
        partial_ratio(&sa, &sb)
    } else {
        ratio(&sa, &sb)
    }
}

/// Compare the shared words against each side's shared+remaining words
pub fn token_set_ratio(a: &str, b: &str, partial: bool) -> u8 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join(ta.intersection(&tb));
    let only_a = join(ta.difference(&tb));
    let only_b = join(tb.difference(&ta));

    let combined_a = format!("{} {}", intersection, only_a).trim().to_string();
    let combined_b = format!("{} {}", intersection, only_b).trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    score(&intersection, &combined_a)
        .max(score(&intersection, &combined_b))
        .max(score(&combined_a, &combined_b))
}

/// Weighted best-of similarity between two raw strings (0-100).
///
/// Both inputs are run through [`preprocess`]; if either ends up empty the
/// score is 0. When one string is at least 1.5x longer than the other the
/// partial variants are tried (scaled by 0.9, or 0.6 past 8x), otherwise the
/// whole-string token variants (scaled by 0.95).
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let pa = preprocess(a);
    let pb = preprocess(b);
    if pa.is_empty() || pb.is_empty() {
        return 0;
    }

    const UNBASE_SCALE: f64 = 0.95;

    let base = f64::from(ratio(&pa, &pb));
    let (la, lb) = (pa.chars().count() as f64, pb.chars().count() as f64);
    let len_ratio = la.max(lb) / la.min(lb);

    let best = if len_ratio < 1.5 {
        let sort = f64::from(token_sort_ratio(&pa, &pb, false)) * UNBASE_SCALE;
        let set = f64::from(token_set_ratio(&pa, &pb, false)) * UNBASE_SCALE;
        base.max(sort).max(set)
    } else {
        let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
        let partial = f64::from(partial_ratio(&pa, &pb)) * partial_scale;
        let sort = f64::from(token_sort_ratio(&pa, &pb, true)) * UNBASE_SCALE * partial_scale;
        let set = f64::from(token_set_ratio(&pa, &pb, true)) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(sort).max(set)
    };

    round(best)
}

/// Index and score of the best-scoring choice, first one on ties
pub fn best_match<S: AsRef<str>>(query: &str, choices: &[S]) -> Option<(usize, u8)> {
    let mut best: Option<(usize, u8)> = None;
    for (i, choice) in choices.iter().enumerate() {
        let score = weighted_ratio(query, choice.as_ref());
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a == b {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    // Indel distance = len_a + len_b - 2 * LCS
    let lcs = lcs_len(a, b);
    200.0 * lcs as f64 / (a.len() + b.len()) as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a, 'b: 'a>(words: impl Iterator<Item = &'a &'b str>) -> String {
    words.copied().collect::<Vec<&str>>().join(" ")
}

fn round(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}
