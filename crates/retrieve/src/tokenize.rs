//! Text normalization: bytes in, stemmed terms out.

use std::collections::HashSet;

use okapi_stem::StemmerCache;

/// A non-empty lowercase stem, as produced by [`normalize`].
pub type Term = String;

/// Parse a stopword list, one word per line, whitespace-trimmed, blank lines skipped.
///
/// Words are compared by exact equality against already-lowercased tokens, so
/// the file is expected to already be lowercase; no case-folding happens here.
pub fn parse_stopwords(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize `text` into an ordered sequence of stems.
///
/// Splits on whitespace only (no Unicode segmentation); each token is
/// lowercased, stripped of ASCII punctuation (digits are kept), dropped if
/// empty or a stopword, then stemmed. Order of emission matches the order of
/// input tokens, since document length and future positional uses depend on it.
///
/// Digit retention matches the final converged indexer; an earlier draft of
/// this pipeline stripped digits, which shifts term identities (`"3d"` vs
/// `"d"`) and is not reproduced here.
pub fn normalize(text: &str, stopwords: &HashSet<String>, cache: &mut StemmerCache) -> Vec<Term> {
    text.split_whitespace()
        .filter_map(|token| {
            let lowered: String = token
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            if lowered.is_empty() || stopwords.contains(&lowered) {
                return None;
            }
            Some(cache.stem(&lowered))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s2_tokenizer_scenario() {
        let stopwords = parse_stopwords("the\n");
        let mut cache = StemmerCache::new();
        let terms = normalize("The runners, running fast!", &stopwords, &mut cache);
        assert_eq!(terms, vec!["runner", "run", "fast"]);
    }

    #[test]
    fn punctuation_only_tokens_are_dropped() {
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let terms = normalize("cat -- , dog", &stopwords, &mut cache);
        assert_eq!(terms, vec!["cat", "dog"]);
    }

    #[test]
    fn digits_are_retained() {
        let stopwords = HashSet::new();
        let mut cache = StemmerCache::new();
        let terms = normalize("covid19 spreads", &stopwords, &mut cache);
        assert_eq!(terms, vec!["covid19", "spread"]);
    }

    #[test]
    fn stopwords_are_dropped_before_stemming() {
        // "studies" stems to "studi"; if stopword removal ran after
        // stemming, a stopword list containing "studi" would have no effect
        // on the literal input token "studies" pre-stem.
        let stopwords = parse_stopwords("studies\n");
        let mut cache = StemmerCache::new();
        let terms = normalize("studies", &stopwords, &mut cache);
        assert!(terms.is_empty());
    }

    #[test]
    fn blank_lines_in_stopword_file_are_skipped() {
        let stopwords = parse_stopwords("the\n\n  \nand\n");
        assert_eq!(stopwords.len(), 2);
    }

    proptest::proptest! {
        #[test]
        fn normalization_is_idempotent(text in "[a-zA-Z0-9 .,!?'\"-]{0,80}") {
            let stopwords = HashSet::new();
            let mut cache = StemmerCache::new();
            let once = normalize(&text, &stopwords, &mut cache);
            let joined = once.join(" ");
            let twice = normalize(&joined, &stopwords, &mut cache);
            proptest::prop_assert_eq!(once, twice);
        }
    }
}
