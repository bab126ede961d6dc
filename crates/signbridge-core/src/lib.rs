//! # signbridge-core
//!
//! Lookup engine behind the SignBridge service.
//!
//! - **Dictionaries**: three immutable key→URL maps (words, alphabet, numbers)
//!   loaded once from JSON files
//! - **Tokenizer**: edge-trim, lowercase, whitespace split
//! - **Resolver**: tiered lookup (word > number > spelling fallback)
//! - **Quiz**: four-option word quiz over an injectable random source

#![deny(unsafe_code)]

pub mod dictionary;
pub mod errors;
pub mod quiz;
pub mod resolver;
pub mod tokenizer;

pub use dictionary::{DataPaths, Dictionaries, Dictionary, DictionaryKind};
pub use errors::{DictionaryError, QuizError};
pub use quiz::{Quiz, QUIZ_OPTION_COUNT, generate_quiz};
pub use resolver::{Translation, resolve, translate};
pub use tokenizer::tokenize;
