pub mod dni;
pub mod expiry;

pub use dni::{is_valid_spanish_dni, normalize_dni};
pub use expiry::{ExpiryValidationResult, ExpiryValidator};
