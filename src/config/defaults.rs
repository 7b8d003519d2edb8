//! Default values for csaf-bridge configuration.

/// Prefix of product IDs minted on export
pub const DEFAULT_PID_PREFIX: &str = "CSAFPID-";

/// CSAF version written when the editing model carries none
pub const DEFAULT_CSAF_VERSION: &str = "2.0";

/// Name given to imported vendor branches without one
pub const DEFAULT_VENDOR_NAME: &str = "Unnamed vendor";

/// Name given to imported product families without one
pub const DEFAULT_FAMILY_NAME: &str = "Unnamed product family";

/// Name given to imported product branches without one
pub const DEFAULT_PRODUCT_NAME: &str = "Unnamed product";

/// Name given to imported version branches without one
pub const DEFAULT_VERSION_NAME: &str = "Unnamed version";
