//! Claim extraction - sentence segmentation plus a relevance heuristic.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::claim::Claim;

static SENTENCE_TERMINATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{3,4}").expect("valid regex"));

/// Split a message into candidate factual claims.
///
/// Sentences are split on runs of terminal punctuation. A segment is kept
/// iff its trimmed length exceeds `min_length` characters and it carries a
/// verifiability signal: a 3-4 digit run (a candidate year) or one of the
/// configured domain keywords, matched case-insensitively. Offsets are byte
/// positions of the trimmed segment in the original message.
pub fn extract_claims(message: &str, keywords: &[String], min_length: usize) -> Vec<Claim> {
    let mut claims = Vec::new();
    let base = message.as_ptr() as usize;

    for segment in SENTENCE_TERMINATOR_RE.split(message) {
        let trimmed = segment.trim();
        if trimmed.chars().count() <= min_length {
            continue;
        }
        if !is_relevant(trimmed, keywords) {
            continue;
        }
        let offset = trimmed.as_ptr() as usize - base;
        claims.push(Claim::new(trimmed, offset));
    }

    claims
}

fn is_relevant(sentence: &str, keywords: &[String]) -> bool {
    if YEAR_RE.is_match(sentence) {
        return true;
    }
    let lower = sentence.to_lowercase();
    keywords
        .iter()
        .any(|keyword| lower.contains(&keyword.to_lowercase()))
}

/// Derive lookup keywords from a claim for knowledge-source search.
///
/// Keeps words longer than four characters that are not in the stop list;
/// falls back to the whole claim when nothing qualifies.
pub fn extract_keywords(claim: &str, stop_words: &[String]) -> String {
    let keywords: Vec<&str> = claim
        .split_whitespace()
        .filter(|word| word.chars().count() > 4)
        .filter(|word| {
            let lower = word.to_lowercase();
            !stop_words.iter().any(|stop| stop.to_lowercase() == lower)
        })
        .collect();

    if keywords.is_empty() {
        claim.to_string()
    } else {
        keywords.join(" ")
    }
}
