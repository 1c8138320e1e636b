use std::sync::Arc;

use chrono::Duration;

use crate::account::errors::AccountError;
use crate::account::models::TokenResponse;
use crate::account::models::User;
use crate::account::ports::TokenSigner;

pub const TOKEN_TYPE: &str = "Bearer";

/// Which of the two issued tokens a set of claims belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Identity claims handed to the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: String,
    pub email: String,
    pub name: String,
    pub kind: TokenKind,
}

impl TokenClaims {
    fn for_user(user: &User, kind: TokenKind) -> Self {
        Self {
            subject: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            kind,
        }
    }
}

/// Lifetimes of issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::seconds(3600),
            refresh: Duration::seconds(604800),
        }
    }
}

/// Builds access/refresh token pairs for authenticated users.
pub struct TokenIssuer<TS>
where
    TS: TokenSigner,
{
    signer: Arc<TS>,
    lifetimes: TokenLifetimes,
}

impl<TS> TokenIssuer<TS>
where
    TS: TokenSigner,
{
    pub fn new(signer: Arc<TS>, lifetimes: TokenLifetimes) -> Self {
        Self { signer, lifetimes }
    }

    /// Issue an access token and a refresh token for `user`.
    ///
    /// The scope is the user's own, not a fixed value.
    ///
    /// # Errors
    /// * `TokenSigning` - The signer failed
    pub fn issue(&self, user: &User) -> Result<TokenResponse, AccountError> {
        let access_token = self.signer.sign(
            &TokenClaims::for_user(user, TokenKind::Access),
            self.lifetimes.access,
        )?;
        let refresh_token = self.signer.sign(
            &TokenClaims::for_user(user, TokenKind::Refresh),
            self.lifetimes.refresh,
        )?;

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.lifetimes.access.num_seconds(),
            refresh_token,
            scope: user.scope().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::account::models::EmailAddress;
    use crate::account::models::Scope;
    use crate::account::models::UserId;

    mock! {
        pub TestTokenSigner {}

        impl TokenSigner for TestTokenSigner {
            fn sign(&self, claims: &TokenClaims, ttl: Duration) -> Result<String, AccountError>;
        }
    }

    fn user_with_scope(scope: &str) -> User {
        User::register(
            UserId::new("u1"),
            "Ana".to_string(),
            EmailAddress::new("ana@x.com"),
            "$argon2id$hash".to_string(),
            Scope::new(scope),
        )
    }

    #[test]
    fn test_issue_token_pair() {
        let mut signer = MockTestTokenSigner::new();

        signer
            .expect_sign()
            .withf(|claims, ttl| {
                claims.kind == TokenKind::Access
                    && claims.subject == "u1"
                    && claims.email == "ana@x.com"
                    && claims.name == "Ana"
                    && *ttl == Duration::seconds(3600)
            })
            .times(1)
            .returning(|_, _| Ok("access".to_string()));

        signer
            .expect_sign()
            .withf(|claims, ttl| {
                claims.kind == TokenKind::Refresh
                    && claims.subject == "u1"
                    && *ttl == Duration::seconds(604800)
            })
            .times(1)
            .returning(|_, _| Ok("refresh".to_string()));

        let issuer = TokenIssuer::new(Arc::new(signer), TokenLifetimes::default());

        let response = issuer
            .issue(&user_with_scope("openid profile email"))
            .expect("Failed to issue tokens");

        assert_eq!(response.access_token, "access");
        assert_eq!(response.refresh_token, "refresh");
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);
        assert_eq!(response.scope, "openid profile email");
    }

    #[test]
    fn test_scope_follows_user() {
        let mut signer = MockTestTokenSigner::new();
        signer
            .expect_sign()
            .times(2)
            .returning(|_, _| Ok("token".to_string()));

        let issuer = TokenIssuer::new(Arc::new(signer), TokenLifetimes::default());

        let response = issuer
            .issue(&user_with_scope("openid admin"))
            .expect("Failed to issue tokens");

        assert_eq!(response.scope, "openid admin");
    }

    #[test]
    fn test_expires_in_follows_configured_lifetime() {
        let mut signer = MockTestTokenSigner::new();
        signer
            .expect_sign()
            .times(2)
            .returning(|_, _| Ok("token".to_string()));

        let lifetimes = TokenLifetimes {
            access: Duration::seconds(900),
            refresh: Duration::days(1),
        };
        let issuer = TokenIssuer::new(Arc::new(signer), lifetimes);

        let response = issuer
            .issue(&user_with_scope("openid"))
            .expect("Failed to issue tokens");

        assert_eq!(response.expires_in, 900);
    }

    #[test]
    fn test_signer_failure_propagates() {
        let mut signer = MockTestTokenSigner::new();
        signer
            .expect_sign()
            .times(1)
            .returning(|_, _| Err(AccountError::TokenSigning("boom".to_string())));

        let issuer = TokenIssuer::new(Arc::new(signer), TokenLifetimes::default());

        let result = issuer.issue(&user_with_scope("openid"));
        assert!(matches!(result, Err(AccountError::TokenSigning(_))));
    }
}
