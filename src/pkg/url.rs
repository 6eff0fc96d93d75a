//! URL validation and canonicalization.

use url::Url;

/// Trims whitespace, then checks the link has both a scheme and a host.
pub fn is_valid_link(link: &str) -> bool {
    let link = link.trim();
    if link.is_empty() {
        return false;
    }

    match Url::parse(link) {
        Ok(parsed) => !parsed.scheme().is_empty() && parsed.host().is_some(),
        Err(_) => false,
    }
}

/// Canonicalizes a link: trims whitespace, strips the query string and
/// fragment. Returns the original (trimmed) string unchanged if it doesn't
/// parse as a URL.
pub fn prepare_link(link: &str) -> String {
    let trimmed = link.trim();

    let Ok(mut parsed) = Url::parse(trimmed) else {
        return trimmed.to_string();
    };

    parsed.set_query(None);
    parsed.set_fragment(None);
    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_fragment() {
        assert_eq!(
            prepare_link("https://example.org/a?x=1#f"),
            "https://example.org/a"
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            prepare_link("  https://example.org/a \n"),
            "https://example.org/a"
        );
    }

    #[test]
    fn rejects_links_without_scheme_or_host() {
        assert!(!is_valid_link("not a url"));
        assert!(!is_valid_link("/just/a/path"));
        assert!(is_valid_link("https://example.org/a"));
    }
}
