use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Credentials;
use crate::account::models::RegisterUserCommand;
use crate::account::models::Scope;
use crate::account::models::TokenResponse;
use crate::account::models::User;
use crate::account::ports::AccountServicePort;
use crate::account::ports::CredentialHasher;
use crate::account::ports::TokenSigner;
use crate::account::ports::UserRepository;
use crate::account::tokens::TokenIssuer;

/// Domain service implementation for account operations.
///
/// Runs the registration and authentication workflows over injected ports.
/// Hashing and verification are CPU-bound and run on the blocking pool.
pub struct AccountService<UR, CH, TS>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TS: TokenSigner,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    token_issuer: TokenIssuer<TS>,
    default_scope: Scope,
}

impl<UR, CH, TS> AccountService<UR, CH, TS>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TS: TokenSigner,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `token_issuer` - Issues tokens after successful authentication
    /// * `default_scope` - Scope given to users registered without one
    pub fn new(
        repository: Arc<UR>,
        hasher: Arc<CH>,
        token_issuer: TokenIssuer<TS>,
        default_scope: Scope,
    ) -> Self {
        Self {
            repository,
            hasher,
            token_issuer,
            default_scope,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))?
    }

    async fn verify_password(
        &self,
        password: String,
        digest: String,
    ) -> Result<bool, AccountError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password verification aborted: {}", e)))
    }
}

#[async_trait]
impl<UR, CH, TS> AccountServicePort for AccountService<UR, CH, TS>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TS: TokenSigner,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, AccountError> {
        // Uniqueness is checked before any hashing work
        if self.repository.find_by_id(&command.id).await?.is_some() {
            tracing::warn!(user_id = %command.id, "Registration rejected: id already exists");
            return Err(AccountError::Conflict(command.id.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User::register(
            command.id,
            command.name,
            command.email,
            password_hash,
            command.scope.unwrap_or_else(|| self.default_scope.clone()),
        );

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id(),
            scope = %created_user.scope(),
            "User registered"
        );

        Ok(created_user)
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<TokenResponse, AccountError> {
        let Some(user) = self.repository.find_by_email(&credentials.email).await? else {
            tracing::warn!("Authentication failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let is_valid = self
            .verify_password(credentials.password, user.password_hash().to_string())
            .await?;

        if !is_valid {
            tracing::warn!(user_id = %user.id(), "Authentication failed: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        let tokens = self.token_issuer.issue(&user)?;

        tracing::info!(user_id = %user.id(), "User authenticated");

        Ok(tokens)
    }
}
