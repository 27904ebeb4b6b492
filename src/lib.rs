pub mod document_validator;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;
pub mod verification;

pub use document_validator::{validate_mrz_from_ocr, DocumentValidator};
pub use models::{CheckResult, MrzFieldSet, MrzLineTriple, MrzStatus, ValidatorConfig, Verdict};
pub use utils::{GrammarViolation, MrzError};
