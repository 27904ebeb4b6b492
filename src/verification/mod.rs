pub mod check_digit;
pub mod mrtd;

pub use check_digit::{char_value, check_digit_matches, compute_check_digit};
pub use mrtd::MrtdVerifier;
