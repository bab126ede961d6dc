//! Tiered token lookup.
//!
//! Each token is resolved against the dictionaries in a fixed order:
//!
//! 1. whole word (`words`)
//! 2. number (`numbers`)
//! 3. spelling fallback, one `alphabet` entry per character
//!
//! Characters with no alphabet entry are skipped. A miss is never an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::Dictionaries;
use crate::tokenizer::tokenize;

/// Ordered video URLs for one piece of text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// URLs in playback order.
    pub urls: Vec<String>,
}

impl Translation {
    /// Number of URLs.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Resolve already-tokenized input to URLs.
pub fn resolve<S: AsRef<str>>(dicts: &Dictionaries, tokens: &[S]) -> Translation {
    let mut urls = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        if let Some(url) = dicts.words.get(token) {
            urls.push(url.to_owned());
            continue;
        }
        if let Some(url) = dicts.numbers.get(token) {
            urls.push(url.to_owned());
            continue;
        }

        debug!(word = token, "word not found, falling back to spelling");
        let mut buf = [0u8; 4];
        for ch in token.chars() {
            match dicts.alphabet.get(ch.encode_utf8(&mut buf)) {
                Some(url) => urls.push(url.to_owned()),
                None => debug!(character = %ch, "skipping unknown character"),
            }
        }
    }

    Translation { urls }
}

/// Tokenize `text` and resolve it.
pub fn translate(dicts: &Dictionaries, text: &str) -> Translation {
    resolve(dicts, &tokenize(text))
}
