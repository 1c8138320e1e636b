//! Binds the domain credential ports to the `auth` library.

use chrono::Duration;

use crate::account::errors::AccountError;
use crate::account::ports::CredentialHasher;
use crate::account::ports::TokenSigner;
use crate::account::tokens::TokenClaims;
use crate::account::tokens::TokenKind;

impl CredentialHasher for auth::PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AccountError> {
        auth::PasswordHasher::hash(self, plaintext)
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        auth::PasswordHasher::verify(self, plaintext, digest)
    }
}

impl TokenSigner for auth::JwtHandler {
    fn sign(&self, claims: &TokenClaims, ttl: Duration) -> Result<String, AccountError> {
        let kind = match claims.kind {
            TokenKind::Access => auth::TokenKind::Access,
            TokenKind::Refresh => auth::TokenKind::Refresh,
        };

        let claims = auth::Claims::new(&claims.subject, &claims.email, &claims.name)
            .with_kind(kind)
            .expiring_in(ttl);

        self.encode(&claims)
            .map_err(|e| AccountError::TokenSigning(e.to_string()))
    }
}
