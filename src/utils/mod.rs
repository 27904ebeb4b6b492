pub mod error;

pub use error::{GrammarViolation, MrzError};
