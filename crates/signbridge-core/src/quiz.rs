//! Four-option sign quiz over the word dictionary.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::errors::QuizError;

/// Options shown per quiz.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// One quiz question: a sign video and the words to choose from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Video of the correct answer.
    pub video_url: String,
    /// Distinct candidate words in display order.
    pub options: Vec<String>,
    /// The word shown in `video_url`.
    pub correct_answer: String,
}

/// Build a quiz from `words` using `rng`.
///
/// Four distinct keys are sampled without replacement; the first sampled key
/// is the answer, then the options are shuffled for display.
pub fn generate_quiz<R: Rng + ?Sized>(words: &Dictionary, rng: &mut R) -> Result<Quiz, QuizError> {
    if words.len() < QUIZ_OPTION_COUNT {
        return Err(QuizError::InsufficientWords {
            available: words.len(),
            required: QUIZ_OPTION_COUNT,
        });
    }

    let keys: Vec<&str> = words.keys().collect();
    let mut options: Vec<String> = keys
        .choose_multiple(&mut *rng, QUIZ_OPTION_COUNT)
        .map(|k| (*k).to_owned())
        .collect();

    let correct_answer = options[0].clone();
    let video_url = words
        .get(&correct_answer)
        .map(str::to_owned)
        .unwrap_or_default();
    options.shuffle(rng);

    Ok(Quiz {
        video_url,
        options,
        correct_answer,
    })
}
