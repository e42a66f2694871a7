//! Mock token verifier for tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal, UserId};
use crate::ports::TokenVerifier;

/// Mock verifier mapping fixed tokens to principals.
///
/// Tokens not in the map are rejected with `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    tokens: RwLock<HashMap<String, Principal>>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token that resolves to the given principal.
    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.write().unwrap().insert(token.into(), principal);
        self
    }

    /// Registers a token for a plain (non-admin) user with the given id.
    pub fn with_user(self, token: impl Into<String>, user_id: i64) -> Self {
        let principal = Principal::new(
            UserId::new(user_id),
            format!("user{}@test.example.com", user_id),
            false,
        );
        self.with_principal(token, principal)
    }

    /// Registers a token for an admin with the given id.
    pub fn with_admin(self, token: impl Into<String>, user_id: i64) -> Self {
        let principal = Principal::new(
            UserId::new(user_id),
            format!("admin{}@test.example.com", user_id),
            true,
        );
        self.with_principal(token, principal)
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves() {
        let verifier = MockTokenVerifier::new().with_user("alice-token", 5);
        let principal = verifier.verify("alice-token").await.unwrap();
        assert_eq!(principal.id, UserId::new(5));
        assert!(!principal.is_admin());
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let verifier = MockTokenVerifier::new();
        assert!(matches!(
            verifier.verify("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
