//! Unified error types for csaf-bridge.
//!
//! Dangling references are deliberately absent from this hierarchy: the
//! transformation engine drops them and reports them through
//! [`crate::transform::DroppedReferences`] instead of failing.

use thiserror::Error;

/// Main error type for csaf-bridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CsafBridgeError {
    /// Errors while turning a CSAF document into the editing model
    #[error("Failed to import CSAF document: {context}")]
    Import {
        context: String,
        #[source]
        source: ImportErrorKind,
    },

    /// Errors while producing a CSAF document from the editing model
    #[error("Failed to export CSAF document: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific import error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ImportErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Document has CSAF markers but does not decode: {0}")]
    InvalidStructure(String),
}

/// Specific export error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("JSON serialization failed: {0}")]
    Serialization(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for csaf-bridge operations
pub type Result<T> = std::result::Result<T, CsafBridgeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CsafBridgeError {
    /// Create an import error with context
    pub fn import(context: impl Into<String>, source: ImportErrorKind) -> Self {
        Self::Import {
            context: context.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<serde_json::Error> for CsafBridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::import(
            "JSON deserialization",
            ImportErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so an error raised deep inside the import
/// pass reads like `"importing advisory: decoding CSAF document: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CsafBridgeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CsafBridgeError, new_ctx: &str) -> CsafBridgeError {
    match err {
        CsafBridgeError::Import {
            context: existing,
            source,
        } => CsafBridgeError::Import {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CsafBridgeError::Export {
            context: existing,
            source,
        } => CsafBridgeError::Export {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CsafBridgeError::Config(msg) => CsafBridgeError::Config(chain_context(new_ctx, &msg)),
        CsafBridgeError::Validation(msg) => {
            CsafBridgeError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
