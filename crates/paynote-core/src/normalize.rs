//! URL normalization
//!
//! Bank messages often embed tracking links. Replacing each URL with its
//! domain keeps path fragments (digits, "at", "to") from leaking into the
//! amount and entity patterns.

use std::borrow::Cow;

use regex::Captures;

use crate::patterns::url_re;

/// Replace every embedded URL with its domain.
///
/// Text without URLs is returned borrowed and unchanged.
pub fn normalize_message(message: &str) -> Cow<'_, str> {
    url_re().replace_all(message, |caps: &Captures| url_domain(&caps[0]).to_string())
}

/// Authority part of a URL: everything between `://` and the first `/`, `?` or `#`.
fn url_domain(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_replaced_by_domain() {
        let text = "Track at https://bank.example.com/t/123?x=9 for details";
        assert_eq!(
            normalize_message(text),
            "Track at bank.example.com for details"
        );
    }

    #[test]
    fn test_multiple_urls() {
        let text = "http://a.in/x and https://b.co.in#frag";
        assert_eq!(normalize_message(text), "a.in and b.co.in");
    }

    #[test]
    fn test_port_and_query_only() {
        assert_eq!(
            normalize_message("go to http://pay.example:8080?ref=1"),
            "go to pay.example:8080"
        );
    }

    #[test]
    fn test_text_without_urls_is_borrowed() {
        let text = "Rs 500 debited";
        assert!(matches!(normalize_message(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_malformed_url_left_alone() {
        assert_eq!(normalize_message("visit www.bank.com"), "visit www.bank.com");
        assert_eq!(normalize_message("http:/broken"), "http:/broken");
    }

    #[test]
    fn test_never_longer() {
        let text = "pay https://x.io/a/b/c now";
        assert!(normalize_message(text).len() <= text.len());
    }
}
