//! Fact citation extraction from free-text answers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use causeway_core::FactId;
use regex::Regex;

/// Matches "fact 3", "Facts 1, 2,4" and similar enumerations.
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfacts?\s(\d+(?:,\s*\d+)*)").expect("citation pattern is valid")
});

/// Every fact id cited in `free_text`.
///
/// Only the `fact(s) N[, M, ...]` form is recognised; bare numbers are not
/// treated as citations. Numbers that do not fit a [`FactId`] are dropped,
/// so noisy output degrades to fewer citations rather than an error.
pub fn extract_citations(free_text: &str) -> BTreeSet<FactId> {
    let mut cited = BTreeSet::new();
    for caps in CITATION_RE.captures_iter(free_text) {
        let Some(list) = caps.get(1) else {
            continue;
        };
        for number in list.as_str().split(',') {
            match number.trim().parse::<FactId>() {
                Ok(id) => {
                    cited.insert(id);
                }
                Err(e) => {
                    tracing::debug!(number = number.trim(), error = %e, "skipping citation");
                }
            }
        }
    }
    cited
}
