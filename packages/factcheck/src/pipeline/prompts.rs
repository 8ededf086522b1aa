//! Verification prompt rendering.
//!
//! The answer schema keywords here are a contract with the response parser
//! in [`crate::pipeline::parse`]; the two must change together.

use crate::types::context::ReferenceContext;

/// Instruction header, including the language directive for the model.
pub const INSTRUCTION_HEADER: &str = "You are a fact-checker for historical information. \
IMPORTANT: Write the EXPLANATION in the SAME language as the claim \
(e.g., if claim is in Polish, explain in Polish). \
Keep VERIFICATION, CONFIDENCE, SOURCE keywords in English.\n\n";

/// Fixed four-line answer schema requested of the model.
pub const ANSWER_SCHEMA: &str = "Provide your answer in the following format:\n\
VERIFICATION: [TRUE/FALSE/PARTIAL/UNVERIFIABLE]\n\
CONFIDENCE: [0.0-1.0]\n\
EXPLANATION: [Brief explanation in the same language as the claim above]\n\
SOURCE: [Source name if available]";

/// Render the verification prompt for one claim.
///
/// Pure and deterministic: identical inputs produce byte-identical output.
/// Blocks appear in fixed order; optional blocks are omitted entirely when
/// their input is absent or empty.
pub fn build_verification_prompt(
    claim: &str,
    caller_context: Option<&str>,
    reference: Option<&ReferenceContext>,
    quotes: &[String],
) -> String {
    let mut prompt = String::from(INSTRUCTION_HEADER);

    if let Some(context) = caller_context.filter(|c| !c.is_empty()) {
        prompt.push_str("Character context: ");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }

    if let Some(reference) = reference {
        prompt.push_str("Reference information from Wikipedia:\n");
        prompt.push_str("- Title: ");
        prompt.push_str(&reference.title);
        prompt.push('\n');
        if let Some(extract) = &reference.extract {
            prompt.push_str("- Summary: ");
            prompt.push_str(extract);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    if !quotes.is_empty() {
        prompt.push_str("Relevant quotes from Wikiquote:\n");
        for quote in quotes {
            prompt.push_str("- ");
            prompt.push_str(quote);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("Claim to verify: ");
    prompt.push_str(claim);
    prompt.push_str("\n\n");
    prompt.push_str(ANSWER_SCHEMA);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic() {
        let reference = ReferenceContext::new("Nicolaus Copernicus").with_extract("Astronomer.");
        let quotes = vec!["A quote.".to_string()];

        let a = build_verification_prompt("claim", Some("ctx"), Some(&reference), &quotes);
        let b = build_verification_prompt("claim", Some("ctx"), Some(&reference), &quotes);
        assert_eq!(a, b);
    }

    #[test]
    fn minimal_prompt_has_header_claim_and_schema() {
        let prompt = build_verification_prompt("Kopernik urodził się w 1473.", None, None, &[]);
        assert!(prompt.starts_with(INSTRUCTION_HEADER));
        assert!(prompt.contains("Claim to verify: Kopernik urodził się w 1473."));
        assert!(prompt.ends_with(ANSWER_SCHEMA));
        assert!(!prompt.contains("Character context"));
        assert!(!prompt.contains("Reference information"));
        assert!(!prompt.contains("Wikiquote"));
    }

    #[test]
    fn blocks_appear_in_fixed_order() {
        let reference = ReferenceContext::new("Title").with_extract("Extract text.");
        let quotes = vec!["Q1".to_string(), "Q2".to_string()];
        let prompt =
            build_verification_prompt("the claim", Some("caller ctx"), Some(&reference), &quotes);

        let context_pos = prompt.find("Character context: caller ctx").unwrap();
        let reference_pos = prompt.find("Reference information from Wikipedia:").unwrap();
        let quotes_pos = prompt.find("Relevant quotes from Wikiquote:").unwrap();
        let claim_pos = prompt.find("Claim to verify: the claim").unwrap();
        let schema_pos = prompt.find("VERIFICATION: [TRUE/FALSE/PARTIAL/UNVERIFIABLE]").unwrap();

        assert!(context_pos < reference_pos);
        assert!(reference_pos < quotes_pos);
        assert!(quotes_pos < claim_pos);
        assert!(claim_pos < schema_pos);
    }

    #[test]
    fn reference_without_extract_omits_summary_line() {
        let reference = ReferenceContext::new("Title only");
        let prompt = build_verification_prompt("claim", None, Some(&reference), &[]);
        assert!(prompt.contains("- Title: Title only"));
        assert!(!prompt.contains("- Summary:"));
    }

    #[test]
    fn empty_caller_context_is_omitted() {
        let prompt = build_verification_prompt("claim", Some(""), None, &[]);
        assert!(!prompt.contains("Character context"));
    }
}
