//! Transcript normalization.

/// Punctuation stripped from both ends of the transcript.
const EDGE_PUNCTUATION: [char; 4] = ['.', ',', '?', '!'];

fn is_edge_char(c: char) -> bool {
    c.is_whitespace() || EDGE_PUNCTUATION.contains(&c)
}

/// Split a transcript into lowercase tokens.
///
/// Edge punctuation and whitespace are trimmed from the whole string, not
/// from each token, so `"Hi, there!"` yields `["hi,", "there"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.trim_matches(is_edge_char)
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("?!.,").is_empty());
    }

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(tokenize("Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn trims_edges_of_whole_string_only() {
        assert_eq!(tokenize("  Hi, there!  "), vec!["hi,", "there"]);
        assert_eq!(tokenize("...wait... what?"), vec!["wait...", "what"]);
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(tokenize("a \t b\n\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn punctuation_before_trailing_tab_is_trimmed() {
        assert_eq!(tokenize("Hello.\t"), vec!["hello"]);
        assert_eq!(tokenize("\nOkay?\r\n"), vec!["okay"]);
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(tokenize("Hello 123."), vec!["hello", "123"]);
    }

    proptest! {
        #[test]
        fn idempotent_on_output(s in ".*") {
            let first = tokenize(&s);
            let second = tokenize(&first.join(" "));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn tokens_are_nonempty_and_unspaced(s in ".*") {
            for token in tokenize(&s) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.chars().any(char::is_whitespace));
            }
        }
    }
}
