//! Pipeline error taxonomy.
//!
//! Expected lifecycle states (missing token, expired link, quota denial) get
//! their own variants so the embedding HTTP/CLI layer can map each to a
//! distinct status instead of a generic failure. Per-recipe failures inside a
//! share batch are recovered locally and never surface as these errors unless
//! the whole batch comes up empty.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input from the caller.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A token or recipe that does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A token that existed but is no longer redeemable (expired or used).
    #[error("{message}")]
    Gone { message: String, details: Value },

    /// A token whose scope does not permit private import.
    #[error("{message}")]
    InvalidScope { message: String, details: Value },

    /// A sender attempting to redeem their own share link.
    #[error("{message}")]
    SelfImport { message: String, details: Value },

    /// Per-source-domain import limits reached.
    #[error("{message}")]
    QuotaExceeded { message: String, details: Value },

    /// The rewrite service is not configured or unreachable.
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    /// No recipe in a share batch could be made compliant.
    #[error("{message}")]
    ComplianceFailed { message: String, details: Value },

    /// Unique-constraint collision in a store.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Unexpected store or runtime failure.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_scope(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidScope {
            message: message.into(),
            details,
        }
    }
    pub fn self_import(message: impl Into<String>, details: Value) -> Self {
        Self::SelfImport {
            message: message.into(),
            details,
        }
    }
    pub fn quota_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn compliance_failed(message: impl Into<String>, details: Value) -> Self {
        Self::ComplianceFailed {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for callers mapping errors onto wire
    /// statuses (e.g. `gone` → HTTP 410).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Gone { .. } => "gone",
            AppError::InvalidScope { .. } => "invalid_scope",
            AppError::SelfImport { .. } => "self_import",
            AppError::QuotaExceeded { .. } => "quota_exceeded",
            AppError::Unavailable { .. } => "unavailable",
            AppError::ComplianceFailed { .. } => "compliance_failed",
            AppError::Conflict { .. } => "conflict",
            AppError::Internal { .. } => "internal_error",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Unique constraint violation",
                    serde_json::json!({ "constraint": db.constraint() }),
                );
            }
        }

        AppError::internal("Database error", serde_json::json!({}))
    }
}
