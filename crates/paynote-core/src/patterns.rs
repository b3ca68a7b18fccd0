//! Named extraction patterns
//!
//! Every regex the pipeline uses lives here, compiled once on first use.
//! Each accessor documents what the pattern matches and what its capture
//! group holds, so the patterns can be tuned (and tested) without touching
//! the gating or tagging logic in the rest of the crate.

use std::sync::OnceLock;

use regex::Regex;

/// `http://` or `https://` followed by everything up to the next whitespace.
///
/// No capture groups; the whole match is the URL.
pub fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s]+").expect("invalid url regex"))
}

/// Optional currency marker (`RS`, `INR`, `MRP`, any case), optional period,
/// optional single whitespace, then a number.
///
/// Group 1: the numeric literal. Commas group digits (`12,345` or the
/// Indian `1,00,000`), and an optional fraction has one or two digits. The
/// marker is never part of the capture.
pub fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:RS|INR|MRP)?\.?\s?([0-9]+(?:,[0-9]{2,3})*(?:\.[0-9]{1,2})?)")
            .expect("invalid amount regex")
    })
}

/// Merchant text after `" at "` or a card-terminal `in*` prefix.
///
/// Group 1: up to two alphanumeric words, optionally joined by a hyphen,
/// plus trailing whitespace (callers trim). May be empty.
pub fn merchant_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:\sat\s|in\*)([A-Za-z0-9]*\s?-?\s?[A-Za-z0-9]*\s?-?\s?)")
            .expect("invalid merchant regex")
    })
}

/// Payment channel after `made on`, `ur`, `made a` (whole words followed by
/// whitespace) or a card-terminal `in*` prefix.
///
/// Group 1: a run of alphabetic words separated by whitespace or hyphens,
/// stopping at the first non-letter (digits, punctuation).
pub fn channel_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:\bmade on\s+|\bur\s+|\bmade a\s+|in\*)([A-Za-z]+(?:\s?-?\s[A-Za-z]+)*)")
            .expect("invalid channel regex")
    })
}

/// One of the entity prepositions as a whole word, any case.
///
/// No capture groups. The entity extractor walks consecutive matches to cut
/// phrases, since the phrase end depends on the next preposition.
pub fn preposition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:at|from|to|via|through|with)\b").expect("invalid preposition regex")
    })
}

/// Group 1 of the first match, if any.
pub(crate) fn first_capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
