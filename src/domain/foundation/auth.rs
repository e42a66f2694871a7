//! Authenticated principal types.
//!
//! A `Principal` is what the token verifier hands to the HTTP layer after a
//! bearer token checks out. It carries only the claims this service uses;
//! any identity provider can populate it through the `TokenVerifier` port.

use super::UserId;
use thiserror::Error;

/// Authenticated caller extracted from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// The caller's user id (`sub` claim).
    pub id: UserId,

    /// The caller's email address from the token claims.
    pub email: String,

    /// Whether the caller holds the admin role.
    pub admin: bool,
}

impl Principal {
    pub fn new(id: UserId, email: impl Into<String>, admin: bool) -> Self {
        Self {
            id,
            email: email.into(),
            admin,
        }
    }

    /// True when this principal may change block status on trainings.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Errors that can occur during token verification.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Token is invalid or has expired")]
    InvalidToken,

    /// The token has expired (kept separate for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but its claims do not match the expected shape.
    #[error("Malformed token claims: {0}")]
    MalformedClaims(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_reports_admin_flag() {
        let admin = Principal::new(UserId::new(1), "admin@example.com", true);
        let user = Principal::new(UserId::new(2), "user@example.com", false);
        assert!(admin.is_admin());
        assert!(!user.is_admin());
    }

    #[test]
    fn auth_errors_display_reason() {
        assert_eq!(
            AuthError::InvalidToken.to_string(),
            "Token is invalid or has expired"
        );
        assert!(AuthError::MalformedClaims("missing sub".into())
            .to_string()
            .contains("missing sub"));
    }
}
