use serde::Serialize;
use std::fmt;

use crate::utils::GrammarViolation;

/// Characters per line in the TD1 (ID card) layout.
pub const TD1_LINE_WIDTH: usize = 30;

/// Filler character used for padding and as a name separator.
pub const FILLER: char = '<';

/// Reason reported for every structural failure.
pub const GRAMMAR_MISMATCH: &str = "TD1 grammar mismatch";

/// Three candidate MRZ lines, each exactly `TD1_LINE_WIDTH` characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MrzLineTriple {
    line1: String,
    line2: String,
    line3: String,
}

impl MrzLineTriple {
    /// Build a triple, truncating or right-padding each line with `<` to the TD1 width.
    pub fn new(line1: &str, line2: &str, line3: &str) -> Self {
        MrzLineTriple {
            line1: Self::normalize(line1),
            line2: Self::normalize(line2),
            line3: Self::normalize(line3),
        }
    }

    // Width is counted in characters so non-ASCII OCR noise cannot split a code point
    fn normalize(line: &str) -> String {
        let mut normalized: String = line.chars().take(TD1_LINE_WIDTH).collect();
        let missing = TD1_LINE_WIDTH - normalized.chars().count();
        normalized.extend(std::iter::repeat(FILLER).take(missing));
        normalized
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    pub fn line3(&self) -> &str {
        &self.line3
    }

    pub fn lines(&self) -> [&str; 3] {
        [&self.line1, &self.line2, &self.line3]
    }
}

impl fmt::Display for MrzLineTriple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.line1, self.line2, self.line3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
    Unspecified,
}

impl Sex {
    pub fn from_marker(marker: char) -> Option<Sex> {
        match marker {
            'M' => Some(Sex::Male),
            'F' => Some(Sex::Female),
            FILLER => Some(Sex::Unspecified),
            _ => None,
        }
    }

    pub fn marker(&self) -> char {
        match self {
            Sex::Male => 'M',
            Sex::Female => 'F',
            Sex::Unspecified => FILLER,
        }
    }
}

/// Identity record decoded from a TD1 line triple.
///
/// Every string field is the raw fixed-width slice of its source line, fillers
/// included, except the two name fields which are already cleaned up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MrzFieldSet {
    pub document_type: String,
    pub issuer: String,
    pub document_number: String,
    pub document_check: char,
    pub optional_data_1: String,
    pub birth_date: String,
    pub birth_check: char,
    pub sex: Sex,
    pub expiry_date: String,
    pub expiry_check: char,
    pub nationality: String,
    pub optional_data_2: String,
    pub composite_check: char,
    pub surnames: String,
    pub given_names: String,
}

impl MrzFieldSet {
    /// Document number with filler padding removed.
    pub fn document_number_clean(&self) -> String {
        self.document_number.replace(FILLER, "")
    }
}

/// Outcome of the four ICAO check digit comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CheckResult {
    pub document_ok: bool,
    pub birth_ok: bool,
    pub expiry_ok: bool,
    pub composite_ok: bool,
    pub all_ok: bool,
}

impl CheckResult {
    pub fn new(document_ok: bool, birth_ok: bool, expiry_ok: bool, composite_ok: bool) -> Self {
        CheckResult {
            document_ok,
            birth_ok,
            expiry_ok,
            composite_ok,
            all_ok: document_ok && birth_ok && expiry_ok && composite_ok,
        }
    }

    /// True when every per-field check passes.
    pub fn fields_ok(&self) -> bool {
        self.document_ok && self.birth_ok && self.expiry_ok
    }

    /// Names of the checks that failed, in MRZ order.
    pub fn failed_checks(&self) -> Vec<&'static str> {
        [
            ("document number", self.document_ok),
            ("birth date", self.birth_ok),
            ("expiry date", self.expiry_ok),
            ("composite", self.composite_ok),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect()
    }
}

/// Coarse classification of a verdict, used to decide what the caller does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MrzStatus {
    Verified,
    /// Field checks pass but the composite digit does not.
    CompositeMismatch,
    CheckDigitMismatch,
    Invalid,
}

impl MrzStatus {
    pub fn advice(&self) -> &'static str {
        match self {
            MrzStatus::Verified => "All check digits match. The document can be matched against the roster.",
            MrzStatus::CompositeMismatch => {
                "Composite check digit mismatch. Refer the document for manual review."
            }
            MrzStatus::CheckDigitMismatch => {
                "One or more check digits do not match. Recapture the MRZ or refer for manual review."
            }
            MrzStatus::Invalid => {
                "The MRZ could not be read. Recapture with all three lines in focus or fall back to manual entry."
            }
        }
    }
}

impl fmt::Display for MrzStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            MrzStatus::Verified => "VERIFIED",
            MrzStatus::CompositeMismatch => "COMPOSITE MISMATCH",
            MrzStatus::CheckDigitMismatch => "CHECK DIGIT MISMATCH",
            MrzStatus::Invalid => "INVALID",
        };
        write!(f, "{}", label)
    }
}

/// Result of validating one block of OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    StructuralFailure {
        reason: String,
        violation: GrammarViolation,
        lines: MrzLineTriple,
    },
    Verified {
        fields: MrzFieldSet,
        checks: CheckResult,
        lines: MrzLineTriple,
    },
}

impl Verdict {
    pub fn status(&self) -> MrzStatus {
        match self {
            Verdict::StructuralFailure { .. } => MrzStatus::Invalid,
            Verdict::Verified { checks, .. } if checks.all_ok => MrzStatus::Verified,
            Verdict::Verified { checks, .. } if checks.fields_ok() => MrzStatus::CompositeMismatch,
            Verdict::Verified { .. } => MrzStatus::CheckDigitMismatch,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status() == MrzStatus::Verified
    }

    /// Roster matching is only allowed on a fully verified MRZ.
    pub fn permits_roster_match(&self) -> bool {
        self.is_valid()
    }

    pub fn fields(&self) -> Option<&MrzFieldSet> {
        match self {
            Verdict::Verified { fields, .. } => Some(fields),
            Verdict::StructuralFailure { .. } => None,
        }
    }

    pub fn checks(&self) -> Option<&CheckResult> {
        match self {
            Verdict::Verified { checks, .. } => Some(checks),
            Verdict::StructuralFailure { .. } => None,
        }
    }

    pub fn lines(&self) -> &MrzLineTriple {
        match self {
            Verdict::StructuralFailure { lines, .. } | Verdict::Verified { lines, .. } => lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_pads_and_truncates() {
        let triple = MrzLineTriple::new("ABC", "", "0123456789012345678901234567890123");
        assert_eq!(triple.line1(), "ABC<<<<<<<<<<<<<<<<<<<<<<<<<<<");
        assert_eq!(triple.line2(), "<".repeat(30));
        assert_eq!(triple.line3(), "012345678901234567890123456789");
        for line in triple.lines() {
            assert_eq!(line.chars().count(), TD1_LINE_WIDTH);
        }
    }

    #[test]
    fn test_triple_counts_characters_not_bytes() {
        let triple = MrzLineTriple::new("ÄÖÜ", "", "");
        assert_eq!(triple.line1().chars().count(), TD1_LINE_WIDTH);
        assert!(triple.line1().starts_with("ÄÖÜ<"));
    }

    #[test]
    fn test_check_result_all_ok_is_conjunction() {
        assert!(CheckResult::new(true, true, true, true).all_ok);
        assert!(!CheckResult::new(true, true, true, false).all_ok);
        assert!(!CheckResult::new(false, true, true, true).all_ok);
    }

    #[test]
    fn test_failed_checks_lists_only_failures() {
        let checks = CheckResult::new(false, true, true, false);
        assert_eq!(checks.failed_checks(), vec!["document number", "composite"]);
        assert!(!checks.fields_ok());
    }

    #[test]
    fn test_sex_markers() {
        assert_eq!(Sex::from_marker('M'), Some(Sex::Male));
        assert_eq!(Sex::from_marker('<'), Some(Sex::Unspecified));
        assert_eq!(Sex::from_marker('X'), None);
        assert_eq!(Sex::Female.marker(), 'F');
    }
}
