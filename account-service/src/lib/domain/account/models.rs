use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::UserStatusError;

/// User aggregate entity.
///
/// Immutable value: fields are private and the `with_*` methods return a new
/// `User` with a refreshed modification timestamp, leaving `self` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    password_hash: String,
    status: UserStatus,
    scope: Scope,
    date_register: DateTime<Utc>,
    date_modify: Option<DateTime<Utc>>,
}

/// Every field of a [`User`], as read from or written to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProps {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub status: UserStatus,
    pub scope: Scope,
    pub date_register: DateTime<Utc>,
    pub date_modify: Option<DateTime<Utc>>,
}

impl User {
    /// Create a freshly registered user.
    ///
    /// Status is always `Active`, `date_register` is now and `date_modify`
    /// stays empty until the first mutation.
    ///
    /// # Arguments
    /// * `password_hash` - Digest produced by the credential hasher, never plaintext
    pub fn register(
        id: UserId,
        name: String,
        email: EmailAddress,
        password_hash: String,
        scope: Scope,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            status: UserStatus::Active,
            scope,
            date_register: Utc::now(),
            date_modify: None,
        }
    }

    /// Reconstruct a user from persisted fields, taken verbatim.
    pub fn rehydrate(props: UserProps) -> Self {
        Self {
            id: props.id,
            name: props.name,
            email: props.email,
            password_hash: props.password_hash,
            status: props.status,
            scope: props.scope,
            date_register: props.date_register,
            date_modify: props.date_modify,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn date_register(&self) -> DateTime<Utc> {
        self.date_register
    }

    pub fn date_modify(&self) -> Option<DateTime<Utc>> {
        self.date_modify
    }

    /// Return a copy with a new name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_modify: Some(self.modification_time()),
            ..self.clone()
        }
    }

    /// Return a copy with a new status.
    pub fn with_status(&self, status: UserStatus) -> Self {
        Self {
            status,
            date_modify: Some(self.modification_time()),
            ..self.clone()
        }
    }

    /// Snapshot of every field, for persistence and serialization.
    pub fn to_props(&self) -> UserProps {
        UserProps {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            status: self.status,
            scope: self.scope.clone(),
            date_register: self.date_register,
            date_modify: self.date_modify,
        }
    }

    // Never earlier than registration, even if the clock stepped back.
    fn modification_time(&self) -> DateTime<Utc> {
        Utc::now().max(self.date_register)
    }
}

/// Caller-supplied user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address used as the login key.
///
/// Kept as supplied; stores compare and persist the [`normalized`](Self::normalized) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form, as stored.
    pub fn normalized(&self) -> EmailAddress {
        EmailAddress(self.0.to_lowercase())
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(UserStatus::Active),
            "INACTIVE" => Ok(UserStatus::Inactive),
            other => Err(UserStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Space-delimited permission scope attached to a user and echoed into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope(String);

impl Scope {
    pub const DEFAULT: &'static str = "openid profile email";

    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user.
///
/// There is deliberately no status field: new users are always active.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
    pub scope: Option<Scope>,
}

impl RegisterUserCommand {
    /// Construct a new register user command.
    ///
    /// # Arguments
    /// * `password` - Plain text password (will be hashed by service)
    /// * `scope` - Requested scope, the configured default when `None`
    pub fn new(
        id: UserId,
        name: String,
        email: EmailAddress,
        password: String,
        scope: Option<Scope>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            scope,
        }
    }
}

/// Login credentials.
#[derive(Debug)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Tokens issued on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub scope: String,
}
