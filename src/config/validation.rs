//! Configuration validation for csaf-bridge.

use super::types::{DefaultNames, ExportConfig, ImportConfig, TransformConfig};
use crate::csaf::SUPPORTED_VERSIONS;
use crate::model::BranchCategory;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for TransformConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.import.validate());
        errors.extend(self.export.validate());
        errors
    }
}

impl Validatable for ImportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        validate_names(&self.default_names)
    }
}

/// Default names feed the editing UI, so none of them may be blank.
fn validate_names(names: &DefaultNames) -> Vec<ConfigError> {
    BranchCategory::ALL
        .into_iter()
        .filter(|category| names.get(*category).trim().is_empty())
        .map(|category| ConfigError {
            field: format!("import.default_names.{}", category.as_wire()),
            message: "Default name must not be empty".to_string(),
        })
        .collect()
}

impl Validatable for ExportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.pid_prefix.chars().any(char::is_whitespace) {
            errors.push(ConfigError {
                field: "export.pid_prefix".to_string(),
                message: format!(
                    "Product ID prefix '{}' must not contain whitespace",
                    self.pid_prefix
                ),
            });
        }

        if !SUPPORTED_VERSIONS.contains(&self.csaf_version.as_str()) {
            errors.push(ConfigError {
                field: "export.csaf_version".to_string(),
                message: format!(
                    "Unsupported CSAF version '{}'. Valid options: {}",
                    self.csaf_version,
                    SUPPORTED_VERSIONS.join(", ")
                ),
            });
        }

        errors
    }
}
