use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::MrzFieldSet;
use crate::utils::MrzError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub birth_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub issues: Vec<String>,
}

/// Interprets the YYMMDD dates of a verified MRZ against a reference day.
pub struct ExpiryValidator;

impl ExpiryValidator {
    pub fn validate(fields: &MrzFieldSet, today: NaiveDate) -> ExpiryValidationResult {
        let mut issues = Vec::new();

        let birth_date = match Self::birth_date(fields, today) {
            Ok(date) => Some(date),
            Err(err) => {
                issues.push(format!("Birth date: {}", err));
                None
            }
        };

        let expiry_date = match Self::expiry_date(fields) {
            Ok(date) => Some(date),
            Err(err) => {
                issues.push(format!("Expiry date: {}", err));
                None
            }
        };

        let not_expired = expiry_date.map_or(false, |date| date >= today);
        if let Some(date) = expiry_date.filter(|_| !not_expired) {
            issues.push(format!("Document expired on {}", date));
        }

        if let (Some(birth), Some(expiry)) = (birth_date, expiry_date) {
            if expiry <= birth {
                issues.push("Expiry date is not after the birth date".to_string());
            }
        }

        ExpiryValidationResult {
            is_valid: issues.is_empty(),
            not_expired,
            birth_date,
            expiry_date,
            issues,
        }
    }

    /// Birth dates are never after `today`: the date is read in the current
    /// century and moved back a hundred years when that lands in the future.
    pub fn birth_date(fields: &MrzFieldSet, today: NaiveDate) -> Result<NaiveDate, MrzError> {
        let (yy, month, day) = Self::split_yymmdd(&fields.birth_date)?;
        let century = today.year() - today.year() % 100;
        NaiveDate::from_ymd_opt(century + yy, month, day)
            .filter(|date| *date <= today)
            .or_else(|| NaiveDate::from_ymd_opt(century - 100 + yy, month, day))
            .ok_or_else(|| MrzError::InvalidDate(fields.birth_date.clone()))
    }

    pub fn expiry_date(fields: &MrzFieldSet) -> Result<NaiveDate, MrzError> {
        NaiveDate::parse_from_str(&fields.expiry_date, "%y%m%d")
            .map_err(|_| MrzError::InvalidDate(fields.expiry_date.clone()))
    }

    fn split_yymmdd(value: &str) -> Result<(i32, u32, u32), MrzError> {
        let invalid = || MrzError::InvalidDate(value.to_string());
        if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let yy = value[0..2].parse::<i32>().map_err(|_| invalid())?;
        let month = value[2..4].parse::<u32>().map_err(|_| invalid())?;
        let day = value[4..6].parse::<u32>().map_err(|_| invalid())?;
        Ok((yy, month, day))
    }
}
