//! Configuration types for import and export passes.

use super::defaults::{
    DEFAULT_CSAF_VERSION, DEFAULT_FAMILY_NAME, DEFAULT_PID_PREFIX, DEFAULT_PRODUCT_NAME,
    DEFAULT_VENDOR_NAME, DEFAULT_VERSION_NAME,
};
use crate::error::{CsafBridgeError, Result};
use crate::model::BranchCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Transformation Configuration
// ============================================================================

/// Top-level configuration of the transformation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TransformConfig {
    /// Settings for turning CSAF documents into the editing model
    pub import: ImportConfig,
    /// Settings for turning the editing model into CSAF documents
    pub export: ExportConfig,
}

impl TransformConfig {
    /// Create a new `TransformConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `TransformConfig` builder.
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder::default()
    }

    /// Parse a configuration from YAML text.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| CsafBridgeError::config(format!("YAML parse error: {e}")))
    }

    /// Serialize this configuration as YAML text
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CsafBridgeError::config(format!("YAML serialization error: {e}")))
    }
}

// ============================================================================
// Builder for TransformConfig
// ============================================================================

/// Builder for constructing `TransformConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct TransformConfigBuilder {
    config: TransformConfig,
}

impl TransformConfigBuilder {
    /// Set the prefix of minted product IDs.
    pub fn pid_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.export.pid_prefix = prefix.into();
        self
    }

    /// Set the CSAF version written when the model has none.
    pub fn csaf_version(mut self, version: impl Into<String>) -> Self {
        self.config.export.csaf_version = version.into();
        self
    }

    /// Enable or disable synthesized relationship names.
    pub const fn name_relationships(mut self, enabled: bool) -> Self {
        self.config.export.name_relationships = enabled;
        self
    }

    /// Set the fallback name for branches of `category` without one.
    pub fn default_name(mut self, category: BranchCategory, name: impl Into<String>) -> Self {
        *self.config.import.default_names.get_mut(category) = name.into();
        self
    }

    /// Set the fallback description for branches of `category`.
    pub fn default_description(
        mut self,
        category: BranchCategory,
        description: impl Into<String>,
    ) -> Self {
        *self.config.import.default_descriptions.get_mut(category) = description.into();
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TransformConfig {
        self.config
    }
}

// ============================================================================
// Import Configuration
// ============================================================================

/// Import settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ImportConfig {
    /// Names given to branches that arrive without one
    pub default_names: DefaultNames,
    /// Descriptions given to branches whose product carries no name
    pub default_descriptions: CategoryLabels,
}

/// Fallback branch names, one per category.
///
/// Fields missing from a configuration file keep their built-in default
/// rather than becoming empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DefaultNames {
    pub vendor: String,
    pub product_family: String,
    pub product_name: String,
    pub product_version: String,
}

impl Default for DefaultNames {
    fn default() -> Self {
        Self {
            vendor: DEFAULT_VENDOR_NAME.to_string(),
            product_family: DEFAULT_FAMILY_NAME.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            product_version: DEFAULT_VERSION_NAME.to_string(),
        }
    }
}

impl DefaultNames {
    /// The fallback name for `category`
    #[must_use]
    pub fn get(&self, category: BranchCategory) -> &str {
        match category {
            BranchCategory::Vendor => &self.vendor,
            BranchCategory::ProductFamily => &self.product_family,
            BranchCategory::ProductName => &self.product_name,
            BranchCategory::ProductVersion => &self.product_version,
        }
    }

    /// Mutable access to the fallback name for `category`
    pub fn get_mut(&mut self, category: BranchCategory) -> &mut String {
        match category {
            BranchCategory::Vendor => &mut self.vendor,
            BranchCategory::ProductFamily => &mut self.product_family,
            BranchCategory::ProductName => &mut self.product_name,
            BranchCategory::ProductVersion => &mut self.product_version,
        }
    }
}

/// One label per supported branch category, empty unless configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CategoryLabels {
    pub vendor: String,
    pub product_family: String,
    pub product_name: String,
    pub product_version: String,
}

impl CategoryLabels {
    /// The label for `category`
    #[must_use]
    pub fn get(&self, category: BranchCategory) -> &str {
        match category {
            BranchCategory::Vendor => &self.vendor,
            BranchCategory::ProductFamily => &self.product_family,
            BranchCategory::ProductName => &self.product_name,
            BranchCategory::ProductVersion => &self.product_version,
        }
    }

    /// Mutable access to the label for `category`
    pub fn get_mut(&mut self, category: BranchCategory) -> &mut String {
        match category {
            BranchCategory::Vendor => &mut self.vendor,
            BranchCategory::ProductFamily => &mut self.product_family,
            BranchCategory::ProductName => &mut self.product_name,
            BranchCategory::ProductVersion => &mut self.product_version,
        }
    }
}

// ============================================================================
// Export Configuration
// ============================================================================

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix of minted product IDs
    pub pid_prefix: String,
    /// CSAF version written when the model does not name one
    pub csaf_version: String,
    /// Synthesize `full_product_name.name` for relationships without a name
    pub name_relationships: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pid_prefix: DEFAULT_PID_PREFIX.to_string(),
            csaf_version: DEFAULT_CSAF_VERSION.to_string(),
            name_relationships: true,
        }
    }
}
