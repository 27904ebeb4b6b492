// TD1 fixed-column grammar (ICAO Doc 9303 ID card layout, three lines of 30)
use std::ops::Range;

use crate::models::{MrzFieldSet, MrzLineTriple, Sex, FILLER};
use crate::utils::GrammarViolation;

/// Character class allowed at a fixed column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// `[A-Z0-9<]`
    Alphanumeric,
    /// `[A-Z]`
    Letter,
    /// `[0-9]`
    Digit,
    /// `[MF<]`
    SexMarker,
}

impl CharClass {
    fn accepts(&self, c: char) -> bool {
        match self {
            CharClass::Alphanumeric => c.is_ascii_uppercase() || c.is_ascii_digit() || c == FILLER,
            CharClass::Letter => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::SexMarker => Sex::from_marker(c).is_some(),
        }
    }
}

struct FieldSpec {
    name: &'static str,
    columns: Range<usize>,
    class: CharClass,
}

const fn field(name: &'static str, start: usize, end: usize, class: CharClass) -> FieldSpec {
    FieldSpec {
        name,
        columns: start..end,
        class,
    }
}

const LINE1_FIELDS: [FieldSpec; 5] = [
    field("document type", 0, 1, CharClass::Alphanumeric),
    field("issuer", 1, 4, CharClass::Letter),
    field("document number", 4, 13, CharClass::Alphanumeric),
    field("document check digit", 13, 14, CharClass::Digit),
    field("optional data 1", 14, 30, CharClass::Alphanumeric),
];

const LINE2_FIELDS: [FieldSpec; 8] = [
    field("birth date", 0, 6, CharClass::Digit),
    field("birth check digit", 6, 7, CharClass::Digit),
    field("sex", 7, 8, CharClass::SexMarker),
    field("expiry date", 8, 14, CharClass::Digit),
    field("expiry check digit", 14, 15, CharClass::Digit),
    field("nationality", 15, 18, CharClass::Letter),
    field("optional data 2", 18, 29, CharClass::Alphanumeric),
    field("composite check digit", 29, 30, CharClass::Digit),
];

/// Parser for the TD1 three-line layout.
pub struct Td1Parser;

impl Td1Parser {
    /// Parse a line triple into a field set.
    ///
    /// Lines 1 and 2 must match their column grammar exactly; line 3 always
    /// parses. The first offending column is reported on failure.
    pub fn parse(triple: &MrzLineTriple) -> Result<MrzFieldSet, GrammarViolation> {
        let line1 = triple.line1();
        let line2 = triple.line2();
        Self::check_line(1, line1, &LINE1_FIELDS)?;
        Self::check_line(2, line2, &LINE2_FIELDS)?;

        // Both lines are now known to be ASCII, so byte ranges are column ranges
        let slice = |line: &str, spec: &FieldSpec| line[spec.columns.clone()].to_string();
        let column_char = |line: &str, spec: &FieldSpec| line.as_bytes()[spec.columns.start] as char;

        let sex_spec = &LINE2_FIELDS[2];
        let sex_marker = column_char(line2, sex_spec);
        let sex = Sex::from_marker(sex_marker).ok_or(GrammarViolation {
            line: 2,
            field: sex_spec.name,
            column: sex_spec.columns.start,
            found: sex_marker,
        })?;
        let (surnames, given_names) = Self::parse_names(triple.line3());

        Ok(MrzFieldSet {
            document_type: slice(line1, &LINE1_FIELDS[0]),
            issuer: slice(line1, &LINE1_FIELDS[1]),
            document_number: slice(line1, &LINE1_FIELDS[2]),
            document_check: column_char(line1, &LINE1_FIELDS[3]),
            optional_data_1: slice(line1, &LINE1_FIELDS[4]),
            birth_date: slice(line2, &LINE2_FIELDS[0]),
            birth_check: column_char(line2, &LINE2_FIELDS[1]),
            sex,
            expiry_date: slice(line2, &LINE2_FIELDS[3]),
            expiry_check: column_char(line2, &LINE2_FIELDS[4]),
            nationality: slice(line2, &LINE2_FIELDS[5]),
            optional_data_2: slice(line2, &LINE2_FIELDS[6]),
            composite_check: column_char(line2, &LINE2_FIELDS[7]),
            surnames,
            given_names,
        })
    }

    fn check_line(line_no: u8, line: &str, fields: &[FieldSpec]) -> Result<(), GrammarViolation> {
        let chars: Vec<char> = line.chars().collect();
        for spec in fields {
            for column in spec.columns.clone() {
                // A short line reports its first missing column as a NUL
                let found = chars.get(column).copied().unwrap_or('\0');
                if !spec.class.accepts(found) {
                    return Err(GrammarViolation {
                        line: line_no,
                        field: spec.name,
                        column,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    /// Split the name line into (surnames, given names).
    pub fn parse_names(line: &str) -> (String, String) {
        let mut segments = line.split("<<");
        let surnames = Self::clean_name(segments.next().unwrap_or(""));
        let given_names = Self::clean_name(&segments.collect::<Vec<_>>().join(" "));
        (surnames, given_names)
    }

    fn clean_name(segment: &str) -> String {
        segment
            .replace(FILLER, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
