//! Configuration module for csaf-bridge.
//!
//! This module provides:
//! - Type-safe configuration structures for import and export passes
//! - Validation for all configuration values
//! - YAML loading from text handed in by the caller
//!
//! # Quick Start
//!
//! ```rust
//! use csaf_bridge::config::{TransformConfig, Validatable};
//!
//! let config = TransformConfig::builder()
//!     .pid_prefix("ACME-PID-")
//!     .build();
//! assert!(config.is_valid());
//!
//! let from_yaml = TransformConfig::from_yaml_str("export:\n  csaf_version: \"2.1\"\n").unwrap();
//! assert_eq!(from_yaml.export.csaf_version, "2.1");
//! ```

mod defaults;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_CSAF_VERSION, DEFAULT_FAMILY_NAME, DEFAULT_PID_PREFIX, DEFAULT_PRODUCT_NAME,
    DEFAULT_VENDOR_NAME, DEFAULT_VERSION_NAME,
};
pub use types::{
    CategoryLabels, DefaultNames, ExportConfig, ImportConfig, TransformConfig,
    TransformConfigBuilder,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `TransformConfig` format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(TransformConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("pid_prefix"));
        assert!(schema.contains("default_names"));
    }
}
