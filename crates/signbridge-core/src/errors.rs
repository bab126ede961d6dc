//! Error types for dictionary loading and quiz generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a dictionary file.
///
/// A missing file is not an error (it yields an empty dictionary); these
/// cover files that exist but cannot be used.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The file exists but could not be read.
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a flat JSON object of string values.
    #[error("failed to parse dictionary {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by quiz generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The word dictionary holds fewer entries than a quiz needs.
    #[error("Not enough words in the dictionary to generate a quiz.")]
    InsufficientWords {
        /// Entries available in the word dictionary.
        available: usize,
        /// Entries required for one quiz.
        required: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_words_message_matches_payload() {
        let err = QuizError::InsufficientWords {
            available: 3,
            required: 4,
        };
        assert_eq!(
            err.to_string(),
            "Not enough words in the dictionary to generate a quiz."
        );
    }

    #[test]
    fn parse_error_names_the_file() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err = DictionaryError::Parse {
            path: PathBuf::from("words.json"),
            source: json_err,
        };
        assert!(err.to_string().contains("words.json"));
        assert!(err.to_string().starts_with("failed to parse dictionary"));
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error as _;
        let err = DictionaryError::Io {
            path: PathBuf::from("alphabet.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("denied"));
    }
}
