//! Model response parsing.
//!
//! Parses the model's semi-structured natural-language reply into a typed
//! verification outcome. Never fails: each field is extracted by an
//! independent regex scan and a missing or malformed field keeps its
//! documented default without blocking the others.
//!
//! The field keywords are a contract with the prompt schema in
//! [`crate::pipeline::prompts`]; the two must change together.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::context::ReferenceContext;
use crate::types::outcome::{VerificationLabel, VerificationOutcome};

/// Default confidence when the model gave no parseable value.
const DEFAULT_CONFIDENCE: f32 = 0.5;

static VERIFICATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*VERIFICATION:\s*\[?\s*(\p{L}+)").expect("valid regex")
});
static CONFIDENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)CONFIDENCE:\s*\[?\s*([0-9]+(?:\s*[.,]\s*[0-9]+)?)").expect("valid regex")
});
static EXPLANATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)EXPLANATION:\s*(.*?)(?:\n\s*SOURCE:|\z)").expect("valid regex")
});

/// Parse model output for one claim into a verification outcome.
///
/// Tolerates extra whitespace, mixed casing, bracketed tokens, comma
/// decimal separators, and Polish keyword variants.
pub fn parse_model_response(
    claim: &str,
    output: &str,
    reference: Option<&ReferenceContext>,
) -> VerificationOutcome {
    let verification = parse_verification(output);
    let confidence = parse_confidence(output).unwrap_or(DEFAULT_CONFIDENCE);
    let explanation = parse_explanation(output);

    let source = match reference {
        Some(reference) => format!("Wikipedia - {}", reference.title),
        None => "Ollama LLM".to_string(),
    };

    VerificationOutcome::new(claim, verification, confidence, explanation, Some(source))
}

fn parse_verification(output: &str) -> VerificationLabel {
    match VERIFICATION_RE.captures(output) {
        Some(caps) => label_from_token(&caps[1]),
        None => VerificationLabel::Unverifiable,
    }
}

fn label_from_token(token: &str) -> VerificationLabel {
    match token.to_uppercase().as_str() {
        "TRUE" | "PRAWDA" => VerificationLabel::Verified,
        "FALSE" | "FAŁSZ" | "FALSZ" => VerificationLabel::False,
        "PARTIAL" | "CZĘŚCIOWO" | "CZESCIOWO" => VerificationLabel::Partial,
        _ => VerificationLabel::Unverifiable,
    }
}

fn parse_confidence(output: &str) -> Option<f32> {
    let caps = CONFIDENCE_RE.captures(output)?;
    let token: String = caps[1]
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    token.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_explanation(output: &str) -> String {
    match EXPLANATION_RE.captures(output) {
        Some(caps) => caps[1].trim().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_well_formed_response() {
        let reference = ReferenceContext::new("Nicolaus Copernicus");
        let outcome = parse_model_response(
            "Kopernik urodził się w 1473 roku",
            "VERIFICATION: TRUE\nCONFIDENCE: 0.95\nEXPLANATION: Correct.\nSOURCE: Wikipedia",
            Some(&reference),
        );

        assert_eq!(outcome.verification, VerificationLabel::Verified);
        assert_eq!(outcome.confidence, 0.95);
        assert_eq!(outcome.explanation, "Correct.");
        assert_eq!(outcome.source.as_deref(), Some("Wikipedia - Nicolaus Copernicus"));
    }

    #[test]
    fn missing_verification_line_defaults_to_unverifiable() {
        let outcome = parse_model_response(
            "claim",
            "Some rambling reply that names no verdict keyword here.",
            None,
        );
        assert_eq!(outcome.verification, VerificationLabel::Unverifiable);
        assert_eq!(outcome.confidence, 0.5);
    }

    #[test]
    fn spaced_decimal_point_parses() {
        let outcome = parse_model_response(
            "claim",
            "VERIFICATION: TRUE\nCONFIDENCE: 0. 95\nEXPLANATION: OK",
            None,
        );
        assert_eq!(outcome.verification, VerificationLabel::Verified);
        assert_eq!(outcome.confidence, 0.95);
    }

    #[test]
    fn comma_decimal_separator_parses() {
        let outcome =
            parse_model_response("claim", "VERIFICATION: FALSE\nCONFIDENCE: 0,9\nEXPLANATION: zły rok", None);
        assert_eq!(outcome.verification, VerificationLabel::False);
        assert_eq!(outcome.confidence, 0.9);
    }

    #[test]
    fn malformed_confidence_keeps_default_without_blocking_label() {
        let outcome = parse_model_response(
            "claim",
            "VERIFICATION: PARTIAL\nCONFIDENCE: quite high\nEXPLANATION: mixed",
            None,
        );
        assert_eq!(outcome.verification, VerificationLabel::Partial);
        assert_eq!(outcome.confidence, 0.5);
        assert_eq!(outcome.explanation, "mixed");
    }

    #[test]
    fn mixed_casing_and_brackets_are_tolerated() {
        let outcome = parse_model_response(
            "claim",
            "verification:  [true]\nconfidence: [0.8]\nexplanation: fine",
            None,
        );
        assert_eq!(outcome.verification, VerificationLabel::Verified);
        assert_eq!(outcome.confidence, 0.8);
    }

    #[test]
    fn polish_tokens_are_recognized() {
        let outcome =
            parse_model_response("claim", "VERIFICATION: PRAWDA\nCONFIDENCE: 0.7", None);
        assert_eq!(outcome.verification, VerificationLabel::Verified);

        let outcome =
            parse_model_response("claim", "VERIFICATION: FAŁSZ\nCONFIDENCE: 0.7", None);
        assert_eq!(outcome.verification, VerificationLabel::False);

        let outcome =
            parse_model_response("claim", "VERIFICATION: CZĘŚCIOWO\nCONFIDENCE: 0.7", None);
        assert_eq!(outcome.verification, VerificationLabel::Partial);
    }

    #[test]
    fn explanation_spans_lines_and_stops_at_source() {
        let outcome = parse_model_response(
            "claim",
            "VERIFICATION: TRUE\nCONFIDENCE: 0.9\nEXPLANATION: First line.\nSecond line.\nSOURCE: Wikipedia",
            None,
        );
        assert_eq!(outcome.explanation, "First line.\nSecond line.");
    }

    #[test]
    fn explanation_runs_to_end_without_source_line() {
        let outcome = parse_model_response(
            "claim",
            "VERIFICATION: TRUE\nCONFIDENCE: 0.9\nEXPLANATION: The only explanation.",
            None,
        );
        assert_eq!(outcome.explanation, "The only explanation.");
    }

    #[test]
    fn missing_explanation_defaults_to_empty() {
        let outcome = parse_model_response("claim", "VERIFICATION: TRUE", None);
        assert_eq!(outcome.explanation, "");
    }

    #[test]
    fn source_without_reference_is_model_label() {
        let outcome = parse_model_response("claim", "VERIFICATION: TRUE", None);
        assert_eq!(outcome.source.as_deref(), Some("Ollama LLM"));
    }

    #[test]
    fn unknown_token_maps_to_unverifiable() {
        let outcome = parse_model_response("claim", "VERIFICATION: MAYBE\nCONFIDENCE: 0.4", None);
        assert_eq!(outcome.verification, VerificationLabel::Unverifiable);
        assert_eq!(outcome.confidence, 0.4);
    }

    proptest! {
        #[test]
        fn confidence_separator_forms_parse(
            int_digit in 0u8..=1,
            frac in 1u32..1000,
            separator in prop::sample::select(vec![".", ",", ". ", " . ", " , "]),
        ) {
            let frac_str = frac.to_string();
            let output = format!("CONFIDENCE: {}{}{}", int_digit, separator, frac_str);
            let expected: f32 = format!("{}.{}", int_digit, frac_str).parse().unwrap();

            let parsed = parse_confidence(&output).unwrap();
            prop_assert!((parsed - expected).abs() < 1e-6);
        }
    }
}
