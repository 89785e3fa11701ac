//! Binary yes/no correctness of a free-text answer.

use causeway_core::Answer;
use regex::RegexBuilder;

/// Does `free_text` contain `true_answer` as a whole word?
///
/// Case-insensitive and word-bounded, so `"Yes, because..."` matches `yes`
/// but `"yesterday"` does not. The answer is matched literally; regex
/// metacharacters in it have no special meaning.
pub fn is_correct(true_answer: &str, free_text: &str) -> bool {
    let expected = true_answer.trim();
    if expected.is_empty() {
        return false;
    }
    let pattern = format!(r"\b{}\b", regex::escape(expected));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(free_text),
        Err(e) => {
            tracing::debug!(error = %e, "answer pattern did not compile");
            false
        }
    }
}

/// [`is_correct`] for a typed answer.
pub fn check_answer(expected: Answer, free_text: &str) -> bool {
    is_correct(expected.as_str(), free_text)
}
