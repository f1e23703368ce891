//! Admin gate
//!
//! A single shared-secret check distinguishing privileged operations from
//! public ones. This is a gate, not a session: it issues no token and
//! establishes no continuing authenticated state.

/// Error types for admin authentication
#[derive(Debug, thiserror::Error)]
pub enum AdminAuthError {
    #[error("Invalid admin password")]
    InvalidPassword,
}

/// Shared-secret admin gate
///
/// The secret is injected at construction from configuration.
pub struct AdminAuth {
    password: String,
}

impl AdminAuth {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Check a supplied password against the configured secret.
    /// Comparison is exact equality, including case.
    pub fn verify(&self, supplied: &str) -> Result<(), AdminAuthError> {
        if supplied == self.password {
            Ok(())
        } else {
            Err(AdminAuthError::InvalidPassword)
        }
    }
}
