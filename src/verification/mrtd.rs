use crate::models::{CheckResult, MrzFieldSet};

use super::check_digit::check_digit_matches;

/// Verifies the check digits embedded in a parsed TD1 field set
/// according to ICAO Doc 9303.
pub struct MrtdVerifier;

impl MrtdVerifier {
    /// Recompute the four check digits and compare them to the embedded ones.
    pub fn verify(fields: &MrzFieldSet) -> CheckResult {
        let document_ok = check_digit_matches(&fields.document_number, fields.document_check);
        let birth_ok = check_digit_matches(&fields.birth_date, fields.birth_check);
        let expiry_ok = check_digit_matches(&fields.expiry_date, fields.expiry_check);
        let composite_ok = check_digit_matches(&Self::composite_source(fields), fields.composite_check);

        let checks = CheckResult::new(document_ok, birth_ok, expiry_ok, composite_ok);
        log::debug!(
            "Check digits: document={} birth={} expiry={} composite={}",
            document_ok,
            birth_ok,
            expiry_ok,
            composite_ok
        );
        checks
    }

    /// Input of the composite check digit. The order is fixed; changing it
    /// breaks verification of genuine documents.
    pub fn composite_source(fields: &MrzFieldSet) -> String {
        let mut source = String::with_capacity(60);
        source.push_str(&fields.document_number);
        source.push(fields.document_check);
        source.push_str(&fields.birth_date);
        source.push(fields.birth_check);
        source.push_str(&fields.expiry_date);
        source.push(fields.expiry_check);
        source.push_str(&fields.optional_data_1);
        source.push_str(&fields.optional_data_2);
        source
    }
}
