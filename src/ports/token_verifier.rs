//! Token verifier port.
//!
//! Resolves a bearer token into an authenticated principal. Keeping this as
//! a port means the HTTP middleware never learns which identity provider or
//! token format is in play.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

/// Port for resolving bearer tokens into principals.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verifies the token and extracts the caller's identity.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` when verification fails
    /// - `MalformedClaims` when the token verifies but the claims do not
    ///   carry the expected shape
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}
