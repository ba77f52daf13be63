//! Backend used when no rewrite model is configured.

use async_trait::async_trait;
use tracing::debug;

use super::service::{RewriteBackend, RewriteError};

/// A completion backend that always reports `Unavailable`.
///
/// Used when no model credentials are present, so share requests degrade to
/// per-recipe "rewrite service unavailable" issues instead of failing at
/// construction time.
pub struct UnconfiguredBackend;

impl UnconfiguredBackend {
    /// Creates a new UnconfiguredBackend instance.
    pub fn new() -> Self {
        debug!("Using UnconfiguredBackend (rewrite model disabled)");
        Self
    }
}

impl Default for UnconfiguredBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RewriteBackend for UnconfiguredBackend {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, RewriteError> {
        Err(RewriteError::Unavailable(
            "no rewrite model configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_backend_is_unavailable() {
        let backend = UnconfiguredBackend::new();
        let err = backend.complete("system", "prompt").await.unwrap_err();
        assert!(matches!(err, RewriteError::Unavailable(_)));
    }
}
