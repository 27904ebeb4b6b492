use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::MrzError;

/// Tunables for candidate line selection and the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Shortest whitespace-stripped line still considered an MRZ candidate.
    pub min_candidate_length: usize,
    /// Minimum number of `<` characters in a candidate line.
    pub min_filler_count: usize,
    /// Try the other orderings of the top three candidates when the default one fails the grammar.
    pub reconcile_line_order: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            min_candidate_length: 28,
            min_filler_count: 5,
            reconcile_line_order: true,
        }
    }
}

impl ValidatorConfig {
    pub fn from_json(json: &str) -> Result<Self, MrzError> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MrzError> {
        let path = path.as_ref();
        log::debug!("Loading validator configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn check(&self) -> Result<(), MrzError> {
        if self.min_candidate_length == 0 {
            return Err(MrzError::ConfigError(
                "min_candidate_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
