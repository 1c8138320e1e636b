use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Discriminates access tokens from refresh tokens.
///
/// Access tokens carry no `type` claim at all; refresh tokens carry
/// `"type": "refresh"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Identity claims embedded in issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    pub email: String,

    pub name: String,

    /// Token kind marker, only present on refresh tokens
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenKind>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create access-token claims for a user identity, without timestamps.
    pub fn new(sub: impl ToString, email: impl ToString, name: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            token_type: None,
            iat: None,
            exp: None,
        }
    }

    /// Mark the claims with a token kind.
    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.token_type = match kind {
            TokenKind::Access => None,
            TokenKind::Refresh => Some(TokenKind::Refresh),
        };
        self
    }

    /// Stamp `iat` with the current time and `exp` with `iat + ttl`.
    pub fn expiring_in(mut self, ttl: Duration) -> Self {
        let now = Utc::now();
        self.iat = Some(now.timestamp());
        self.exp = Some((now + ttl).timestamp());
        self
    }

    /// Kind of token these claims belong to.
    pub fn kind(&self) -> TokenKind {
        self.token_type.unwrap_or(TokenKind::Access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user123", "alice@example.com", "Alice");

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.kind(), TokenKind::Access);
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_expiring_in() {
        let claims = Claims::new("user123", "alice@example.com", "Alice")
            .expiring_in(Duration::seconds(3600));

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 3600);
    }

    #[test]
    fn test_access_claims_have_no_type_field() {
        let claims = Claims::new("user123", "alice@example.com", "Alice");
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("type").is_none());
        assert_eq!(json["sub"], "user123");
    }

    #[test]
    fn test_refresh_claims_serialize_type() {
        let claims =
            Claims::new("user123", "alice@example.com", "Alice").with_kind(TokenKind::Refresh);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["type"], "refresh");
        assert_eq!(claims.kind(), TokenKind::Refresh);
    }
}
