// Spanish national identity number (DNI) helpers for the manual fallback path
use lazy_static::lazy_static;
use regex::Regex;

const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

lazy_static! {
    static ref DNI_PATTERN: Regex = Regex::new(r"^(\d{8})([A-Z])$").unwrap();
}

/// Uppercase and drop whitespace and dashes, as typed DNIs often carry them.
pub fn normalize_dni(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Control letter for an eight-digit DNI number.
pub fn dni_letter(number: u32) -> char {
    DNI_LETTERS[(number % 23) as usize] as char
}

/// True when `dni` (already normalised) is eight digits followed by the right control letter.
pub fn is_valid_spanish_dni(dni: &str) -> bool {
    let captures = match DNI_PATTERN.captures(dni) {
        Some(captures) => captures,
        None => return false,
    };
    match captures[1].parse::<u32>() {
        Ok(number) => captures[2].chars().next() == Some(dni_letter(number)),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_dni(" 12345678-z "), "12345678Z");
        assert_eq!(normalize_dni("1234 5678 z"), "12345678Z");
        assert_eq!(normalize_dni(""), "");
    }

    #[test]
    fn test_control_letter() {
        assert_eq!(dni_letter(12345678), 'Z');
        assert_eq!(dni_letter(0), 'T');
        assert_eq!(dni_letter(22), 'E');
    }

    #[test]
    fn test_valid_and_invalid_dni() {
        assert!(is_valid_spanish_dni("12345678Z"));
        assert!(is_valid_spanish_dni("00000000T"));
        assert!(!is_valid_spanish_dni("12345678A"));
        assert!(!is_valid_spanish_dni("1234567Z"));
        assert!(!is_valid_spanish_dni("12345678z"));
        assert!(!is_valid_spanish_dni("X1234567L"));
    }
}
