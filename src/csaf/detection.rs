//! Lightweight CSAF shape detection.
//!
//! Import needs to tell "not a CSAF file at all" apart from "a CSAF file that
//! fails to decode". Detection looks only at a handful of markers on the
//! parsed JSON value, without decoding the whole document.

use serde_json::Value;

/// Confidence level for CSAF detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// No confidence - definitely not CSAF
    pub const NONE: Self = Self(0.0);
    /// Low confidence - might be CSAF
    pub const LOW: Self = Self(0.25);
    /// Medium confidence - likely CSAF
    pub const MEDIUM: Self = Self(0.5);
    /// High confidence - almost certainly CSAF
    pub const HIGH: Self = Self(0.75);
    /// Certain - definitely CSAF
    pub const CERTAIN: Self = Self(1.0);

    /// Create a new confidence value
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the confidence value
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Whether this confidence is enough to attempt an import
    #[must_use]
    pub fn can_import(&self) -> bool {
        self.0 >= Self::MEDIUM.0
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// Result of inspecting a JSON value for CSAF markers
#[derive(Debug, Clone, Default)]
pub struct CsafDetection {
    /// Confidence that the value is a CSAF document
    pub confidence: FormatConfidence,
    /// `document.csaf_version`, when present
    pub version: Option<String>,
    /// Issues noticed during detection
    pub warnings: Vec<String>,
}

impl CsafDetection {
    /// A detection result indicating no match
    #[must_use]
    pub fn no_match() -> Self {
        Self::default()
    }

    /// A detection result with the given confidence
    #[must_use]
    pub fn with_confidence(confidence: FormatConfidence) -> Self {
        Self {
            confidence,
            ..Self::default()
        }
    }

    /// Set the detected version
    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Add a warning
    #[must_use]
    pub fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }

    /// Whether an import should be attempted
    #[must_use]
    pub fn can_import(&self) -> bool {
        self.confidence.can_import()
    }
}

/// CSAF versions this crate knows how to map
pub const SUPPORTED_VERSIONS: &[&str] = &["2.0", "2.1"];

/// Inspect a parsed JSON value for CSAF markers.
///
/// `document.csaf_version` makes the value certainly CSAF; a `document` with a
/// `tracking` object but no version is still accepted with medium confidence,
/// since drafts saved mid-edit routinely lack the version field.
#[must_use]
pub fn detect(value: &Value) -> CsafDetection {
    let Some(document) = value.get("document").and_then(Value::as_object) else {
        return CsafDetection::no_match();
    };

    if let Some(version) = document.get("csaf_version").and_then(Value::as_str) {
        let detection = CsafDetection::with_confidence(FormatConfidence::CERTAIN).version(version);
        if SUPPORTED_VERSIONS.contains(&version) {
            return detection;
        }
        return detection.warning("Unsupported csaf_version - mapping as 2.0");
    }

    if document.get("tracking").is_some_and(Value::is_object) {
        return CsafDetection::with_confidence(FormatConfidence::MEDIUM)
            .warning("Missing document.csaf_version - might not be CSAF");
    }

    if value.get("product_tree").is_some() || value.get("vulnerabilities").is_some() {
        return CsafDetection::with_confidence(FormatConfidence::LOW)
            .warning("CSAF sections present but document metadata is missing");
    }

    CsafDetection::no_match()
}

/// Whether `value` has the shape of a CSAF document
#[must_use]
pub fn is_csaf_document(value: &Value) -> bool {
    detect(value).can_import()
}
