// Fallback table invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use letter_pop::FALLBACK_ROUNDS;

#[test]
fn fallback_table_has_enough_rounds() {
    assert!(FALLBACK_ROUNDS.len() >= 3, "need at least 3 fallback rounds");
}

#[test]
fn fallback_letters_are_unique_uppercase_ascii() {
    let mut seen = HashSet::new();
    for (letter, _) in FALLBACK_ROUNDS {
        assert!(letter.is_ascii_uppercase(), "letter '{}' is not A-Z", letter);
        assert!(seen.insert(*letter), "duplicate fallback letter '{}'", letter);
    }
}

#[test]
fn correct_word_starts_with_letter_and_distractors_do_not() {
    for (letter, pairs) in FALLBACK_ROUNDS {
        let starts = |w: &str| {
            w.chars()
                .next()
                .map(|c| c.eq_ignore_ascii_case(letter))
                .unwrap_or(false)
        };
        let (correct, _) = pairs[0];
        assert!(starts(correct), "'{}' does not start with '{}'", correct, letter);
        for (wrong, _) in &pairs[1..] {
            assert!(!starts(wrong), "distractor '{}' starts with '{}'", wrong, letter);
        }
    }
}

#[test]
fn words_and_emoji_are_non_empty_and_distinct_within_a_round() {
    for (letter, pairs) in FALLBACK_ROUNDS {
        let words: HashSet<&str> = pairs.iter().map(|(w, _)| *w).collect();
        assert_eq!(words.len(), 3, "repeated word in round '{}'", letter);
        for (w, e) in pairs {
            assert!(!w.trim().is_empty(), "empty word in round '{}'", letter);
            assert!(!e.trim().is_empty(), "empty emoji for '{}'", w);
        }
    }
}
