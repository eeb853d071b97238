// Bio signals: structured hints pulled from a free-text profile bio.
//
// Two cheap checks: does the bio lean on crypto vocabulary, and does it push
// a link. Both feed the scoring engine; neither tries to understand the text.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Substrings that mark a bio as crypto-flavored. Matched case-insensitively,
/// so "ETH" and "Tokenomics" both hit.
pub const CRYPTO_KEYWORDS: &[&str] = &[
    "crypto",
    "bitcoin",
    "eth",
    "nft",
    "defi",
    "web3",
    "blockchain",
    "token",
    "coin",
    "solana",
];

/// Signals derived from a profile bio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioSignals {
    /// Character count (not bytes)
    pub length: usize,
    pub has_crypto_keywords: bool,
    pub has_links: bool,
}

fn link_pattern() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"https?://\S+").expect("link pattern is a valid regex"))
}

/// Extract bio signals. An absent or empty bio yields all-default signals.
pub fn extract_bio_signals(bio: Option<&str>) -> BioSignals {
    let bio = match bio {
        Some(text) if !text.is_empty() => text,
        _ => return BioSignals::default(),
    };

    let lowered = bio.to_lowercase();

    BioSignals {
        length: bio.chars().count(),
        has_crypto_keywords: CRYPTO_KEYWORDS.iter().any(|kw| lowered.contains(kw)),
        has_links: link_pattern().is_match(bio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent_bio() {
        assert_eq!(extract_bio_signals(None), BioSignals::default());
        assert_eq!(extract_bio_signals(Some("")), BioSignals::default());
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let signals = extract_bio_signals(Some("Building on SOLANA"));
        assert!(signals.has_crypto_keywords);
        assert!(!signals.has_links);
    }

    #[test]
    fn test_keyword_is_substring_match() {
        // "ethics" contains "eth"; substring matching is deliberately naive
        let signals = extract_bio_signals(Some("Professor of ethics"));
        assert!(signals.has_crypto_keywords);
    }

    #[test]
    fn test_link_detection() {
        assert!(extract_bio_signals(Some("see https://example.com")).has_links);
        assert!(extract_bio_signals(Some("http://x.co")).has_links);
        // Scheme with nothing after it is not a link
        assert!(!extract_bio_signals(Some("just http:// here")).has_links);
        assert!(!extract_bio_signals(Some("example.com")).has_links);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let signals = extract_bio_signals(Some("café ☕"));
        assert_eq!(signals.length, 6);
    }
}
