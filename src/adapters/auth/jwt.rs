//! HS256 JWT verifier.
//!
//! Tokens are minted by the users service with a shared secret; this service
//! only verifies them and extracts the caller's id and admin flag.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, Principal, UserId};
use crate::ports::TokenVerifier;

/// Claims carried by a users-service token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: i64,
    email: String,
    admin: bool,
}

/// Token verifier over a shared HS256 secret.
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &Secret<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens from the users service may omit exp; still rejected when an
        // expired exp is present.
        validation.set_required_spec_claims::<&str>(&[]);
        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::Json(err) => AuthError::MalformedClaims(err.to_string()),
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(Principal::new(
            UserId::new(data.claims.sub),
            data.claims.email,
            data.claims.admin,
        ))
    }
}
