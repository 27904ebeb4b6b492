use crate::models::*;
use crate::processing::{LineSelector, Td1Parser};
use crate::utils::GrammarViolation;
use crate::verification::MrtdVerifier;

// Orderings of the top three candidates tried after the default one fails
const ALTERNATE_ORDERS: [[usize; 3]; 5] = [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

/// Runs OCR text through line selection, TD1 parsing and check digit verification.
///
/// Holds only its configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct DocumentValidator {
    config: ValidatorConfig,
}

impl DocumentValidator {
    pub fn new() -> Self {
        DocumentValidator::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        DocumentValidator { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    // Main validation function that orchestrates the entire process
    pub fn validate(&self, ocr_text: &str) -> Verdict {
        // Step 1: Pick the candidate lines
        let candidates = LineSelector::candidates(ocr_text, &self.config);
        let lines = LineSelector::triple_from(&candidates);

        // Step 2: Parse, falling back to other candidate orders if allowed
        let (lines, fields) = match Td1Parser::parse(&lines) {
            Ok(fields) => (lines, fields),
            Err(violation) => match self.reconcile(&candidates) {
                Some(found) => found,
                None => return Self::structural_failure(violation, lines),
            },
        };

        // Step 3: Verify the check digits
        let checks = MrtdVerifier::verify(&fields);
        let verdict = Verdict::Verified {
            fields,
            checks,
            lines,
        };
        log::info!("MRZ verdict: {}", verdict.status());
        verdict
    }

    fn reconcile(&self, candidates: &[String]) -> Option<(MrzLineTriple, MrzFieldSet)> {
        if !self.config.reconcile_line_order || candidates.len() < 2 {
            return None;
        }
        let line = |i: usize| candidates.get(i).map(String::as_str).unwrap_or("");

        ALTERNATE_ORDERS.iter().find_map(|order| {
            let lines = MrzLineTriple::new(line(order[0]), line(order[1]), line(order[2]));
            let fields = Td1Parser::parse(&lines).ok()?;
            log::debug!("Candidate lines reordered as {:?}", order);
            Some((lines, fields))
        })
    }

    fn structural_failure(violation: GrammarViolation, lines: MrzLineTriple) -> Verdict {
        log::warn!("{}: {}", GRAMMAR_MISMATCH, violation);
        Verdict::StructuralFailure {
            reason: GRAMMAR_MISMATCH.to_string(),
            violation,
            lines,
        }
    }
}

/// Validate OCR text with the default configuration.
pub fn validate_mrz_from_ocr(ocr_text: &str) -> Verdict {
    DocumentValidator::new().validate(ocr_text)
}
