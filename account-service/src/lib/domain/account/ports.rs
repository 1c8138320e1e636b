use async_trait::async_trait;
use chrono::Duration;

use crate::account::errors::AccountError;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterUserCommand;
use crate::account::models::TokenResponse;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::tokens::TokenClaims;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Command containing id, name, email, plaintext password and optional scope
    ///
    /// # Returns
    /// User entity exactly as persisted by the store
    ///
    /// # Errors
    /// * `Conflict` - A user with this id already exists
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, AccountError>;

    /// Validate credentials and issue tokens.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// Access and refresh tokens for the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenSigning` - Token generation failed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, credentials: Credentials) -> Result<TokenResponse, AccountError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce uniqueness of both id and email themselves,
/// so that two concurrent registrations can never both be persisted.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// User as stored (email lowercased)
    ///
    /// # Errors
    /// * `Conflict` - Id is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve user by email address, compared case-insensitively.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AccountError>;
}

/// One-way password hashing.
///
/// Implementations must not log plaintext or digests.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce a salted digest; two calls with the same plaintext differ.
    ///
    /// # Errors
    /// * `Hashing` - Hashing operation failed
    fn hash(&self, plaintext: &str) -> Result<String, AccountError>;

    /// Check a plaintext against a digest. Malformed digests never match.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Signs identity claims into an opaque, time-limited token.
pub trait TokenSigner: Send + Sync + 'static {
    /// # Errors
    /// * `TokenSigning` - Token generation failed
    fn sign(&self, claims: &TokenClaims, ttl: Duration) -> Result<String, AccountError>;
}
