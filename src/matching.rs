//! Fuzzy comparison of a free-text guess against a canonical answer.
//!
//! Three heuristics are applied in order: parenthetical alternatives,
//! character-level similarity, and stemmed token-set coverage. The whole
//! module is pure; the stemmer and stopword list are process-wide read-only
//! resources initialized on first use.

use difflib::sequencematcher::SequenceMatcher;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::LazyLock;

const MATCH_RATIO_THRESHOLD: f32 = 0.75;

/// Splits an answer into top-level segments: parenthesized groups and the
/// bare text between them.
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)|[^()]+").expect("segment regex is valid"));

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

static STOPWORDS: LazyLock<HashSet<String>> =
    LazyLock::new(|| stop_words::get(stop_words::LANGUAGE::English).into_iter().collect());

/// Returns true when `guess` is an acceptable match for `correct_answer`.
///
/// Answers like "Mount Everest (Sagarmatha)" decompose into two segments
/// that are each checked independently; a guess matching either one counts.
pub fn check_guess(guess: &str, correct_answer: &str) -> bool {
    let segments: Vec<&str> = SEGMENT_RE
        .find_iter(correct_answer)
        .map(|m| m.as_str())
        .collect();
    if segments.len() == 2 {
        for segment in &segments {
            let bare = segment.replace(['(', ')'], "");
            if check_guess(guess, &bare) {
                return true;
            }
        }
    }

    if SequenceMatcher::new(guess, correct_answer).ratio() >= MATCH_RATIO_THRESHOLD {
        return true;
    }

    // Set containment, not multiset: duplicate tokens collapse. Stopwords are
    // filtered from the answer side only, after normalization. An answer that
    // is all stopwords leaves an empty set, which any guess covers; that
    // permissive edge case is intentional (see tests).
    let guess_tokens: HashSet<String> = guess.split_whitespace().map(normalize_token).collect();
    correct_answer
        .split_whitespace()
        .map(normalize_token)
        .filter(|token| !STOPWORDS.contains(token))
        .all(|token| guess_tokens.contains(&token))
}

/// Lowercase, strip ASCII punctuation, and reduce to an English stem.
fn normalize_token(token: &str) -> String {
    let lowered = token.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    STEMMER.stem(&stripped).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_accepted() {
        assert!(check_guess("Paris", "Paris"));
        assert!(check_guess("the Great Gatsby", "the Great Gatsby"));
    }

    #[test]
    fn case_differences_pass_the_ratio_check() {
        // "paris" vs "Paris" shares 4 of 5 characters per side
        assert!(check_guess("paris", "Paris"));
    }

    #[test]
    fn near_misses_pass_the_ratio_check() {
        assert!(check_guess("Mississipi", "Mississippi"));
    }

    #[test]
    fn wrong_answers_are_rejected() {
        assert!(!check_guess("London", "Paris"));
        assert!(!check_guess("", "Paris"));
    }

    #[test]
    fn parenthetical_alternatives_match_independently() {
        let answer = "Mount Everest (Sagarmatha)";
        assert!(check_guess("Mount Everest", answer));
        assert!(check_guess("Sagarmatha", answer));
        assert!(check_guess("sagarmatha", answer));
        assert!(!check_guess("Kilimanjaro", answer));
    }

    #[test]
    fn token_coverage_is_order_independent() {
        assert!(check_guess("Lincoln Abraham", "Abraham Lincoln"));
    }

    #[test]
    fn stopwords_are_dropped_from_the_answer_only() {
        assert!(check_guess("Grapes Wrath", "The Grapes of Wrath"));
    }

    #[test]
    fn stemming_normalizes_word_forms() {
        assert!(check_guess("running shoe", "the running shoes"));
    }

    #[test]
    fn duplicate_tokens_collapse() {
        assert!(check_guess("sugar", "sugar sugar"));
    }

    #[test]
    fn partial_token_coverage_is_rejected() {
        // "mount" is missing from the guess, and the ratio is below threshold
        assert!(!check_guess("Everest", "Mount Everest"));
    }

    #[test]
    fn punctuation_is_ignored_in_token_coverage() {
        assert!(check_guess("OBrien Conan", "Conan O'Brien"));
    }

    // Known permissive edge case: an answer made entirely of stopwords leaves
    // an empty token set, and the empty set is covered by any guess. Preserved
    // on purpose; do not "fix" without changing product intent.
    #[test]
    fn all_stopword_answer_accepts_any_guess() {
        assert!(check_guess("zebra", "the"));
    }
}
