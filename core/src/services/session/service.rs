//! Session service implementation

use std::future::Future;
use std::sync::Arc;

use auth_shared::config::AuthConfig;
use auth_shared::utils::validation::{is_valid_email, mask_identifier, not_empty};
use tracing::{debug, info, warn};

use crate::domain::entities::user::User;
use crate::domain::value_objects::{PublishedKeySet, TokenPair};
use crate::errors::{DomainError, DomainResult, StoreError};
use crate::repositories::{RefreshStore, UserRepository};
use crate::services::credential::CredentialHasher;
use crate::services::refresh::RefreshTokenLedger;
use crate::services::token::{KeyCustodian, TokenIssuer};

use super::config::SessionServiceConfig;

/// Stateless orchestrator for registration, login, refresh and logout
///
/// All session state lives in the user store and the refresh ledger, so one
/// instance can be shared by any number of request handlers.
pub struct SessionService<U, S>
where
    U: UserRepository,
    S: RefreshStore,
{
    /// User store
    user_repository: Arc<U>,
    /// Password hashing
    hasher: CredentialHasher,
    /// Signing key owner, read for the published key set
    custodian: Arc<KeyCustodian>,
    /// Access-token signing
    issuer: TokenIssuer,
    /// Refresh-token bookkeeping
    ledger: RefreshTokenLedger<S>,
    /// Service configuration
    config: SessionServiceConfig,
}

impl<U, S> SessionService<U, S>
where
    U: UserRepository,
    S: RefreshStore,
{
    /// Create a new session service from its parts
    pub fn new(
        user_repository: Arc<U>,
        hasher: CredentialHasher,
        custodian: Arc<KeyCustodian>,
        issuer: TokenIssuer,
        ledger: RefreshTokenLedger<S>,
        config: SessionServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            custodian,
            issuer,
            ledger,
            config,
        }
    }

    /// Wire a session service from the stores, the key custodian and
    /// the authentication configuration
    pub fn from_config(
        user_repository: Arc<U>,
        refresh_store: Arc<S>,
        custodian: Arc<KeyCustodian>,
        config: &AuthConfig,
    ) -> Self {
        Self::new(
            user_repository,
            CredentialHasher::new(&config.hasher),
            custodian.clone(),
            TokenIssuer::new(custodian, &config.token),
            RefreshTokenLedger::new(refresh_store, &config.token),
            SessionServiceConfig::from(config),
        )
    }

    /// Register a new user and open a session for them
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - access and refresh token for the new user
    /// * `Err(DomainError::BadCredentials)` - empty name or password, malformed
    ///   email, or the name/email is already taken
    /// * `Err(DomainError::Internal)` - store or signing failure
    /// * `Err(DomainError::Unavailable)` - a store did not answer in time
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<TokenPair> {
        if !not_empty(name) {
            return Err(DomainError::bad_credentials("name is required"));
        }
        if !is_valid_email(email) {
            return Err(DomainError::bad_credentials("invalid email"));
        }
        if !not_empty(password) {
            return Err(DomainError::bad_credentials("password is required"));
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = User::new(name.to_string(), email.to_string(), password_hash);

        self.bounded("create user", self.user_repository.create(&user))
            .await?
            .map_err(|e| match e {
                StoreError::Duplicate { field } => {
                    debug!(field = %field, email = %mask_identifier(email), "Registration rejected: duplicate");
                    DomainError::bad_credentials("already registered")
                }
                other => DomainError::internal("create user", other),
            })?;

        info!(user_id = %user.id, "User registered");
        self.open_session(&user).await
    }

    /// Authenticate by name or email and open a session
    ///
    /// Unknown identifiers and wrong passwords produce the same error.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<TokenPair> {
        let user = self.authenticate(identifier, password).await?;

        info!(user_id = %user.id, "User logged in");
        self.open_session(&user).await
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The refresh token stays valid until its uses run out or it expires;
    /// it is not reissued here.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - new access token
    /// * `Err(DomainError::TooManyRequests)` - the token has no uses left
    /// * `Err(DomainError::ExpiredToken)` - the token is unknown or expired
    /// * `Err(DomainError::Internal)` - the owning user is gone, or a store or
    ///   signing failure
    /// * `Err(DomainError::Unavailable)` - a store did not answer in time
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<String> {
        let remaining = self
            .bounded("refresh rate check", self.ledger.rate_remaining(refresh_token))
            .await??;
        if remaining == Some(0) {
            debug!(token = %mask_identifier(refresh_token), "Refresh token exhausted");
            return Err(DomainError::TooManyRequests);
        }

        let user_id = self
            .bounded("refresh redeem", self.ledger.redeem(refresh_token))
            .await??;

        let user = self
            .bounded("find user", self.user_repository.find_by_id(user_id))
            .await?
            .map_err(|e| DomainError::internal("find user", e))?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh token belongs to a missing user");
                DomainError::internal("refresh token", format!("user {} not found", user_id))
            })?;

        let access_token = self.issuer.sign(&user)?;
        debug!(user_id = %user.id, "Access token refreshed");
        Ok(access_token)
    }

    /// Re-authenticate and revoke `refresh_token` when one is given
    ///
    /// Only a token issued to the authenticated user is revoked. A token that
    /// belongs to someone else, or is already gone, is left untouched and the
    /// logout still succeeds.
    pub async fn logout(
        &self,
        identifier: &str,
        password: &str,
        refresh_token: Option<&str>,
    ) -> DomainResult<()> {
        let user = self.authenticate(identifier, password).await?;

        if let Some(token) = refresh_token {
            let owner = self
                .bounded("refresh owner", self.ledger.owner(token))
                .await??;
            match owner {
                Some(owner) if owner == user.id => {
                    self.revoke_refresh_token(token).await?;
                }
                Some(_) => {
                    warn!(
                        user_id = %user.id,
                        token = %mask_identifier(token),
                        "Logout ignored a refresh token issued to another user"
                    );
                }
                None => {
                    debug!(token = %mask_identifier(token), "Logout token already gone");
                }
            }
        }

        info!(user_id = %user.id, "User logged out");
        Ok(())
    }

    /// Delete a refresh token; revoking an unknown token is not an error
    ///
    /// # Returns
    ///
    /// Whether a live token was removed
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> DomainResult<bool> {
        let revoked = self
            .bounded("refresh revoke", self.ledger.revoke(refresh_token))
            .await??;
        debug!(token = %mask_identifier(refresh_token), revoked, "Refresh token revocation");
        Ok(revoked)
    }

    /// Current published key set
    pub fn public_key_set(&self) -> PublishedKeySet {
        self.custodian.public_key_set()
    }

    async fn authenticate(&self, identifier: &str, password: &str) -> DomainResult<User> {
        let user = self
            .bounded("find user", self.user_repository.find_by_identifier(identifier))
            .await?
            .map_err(|e| DomainError::internal("find user", e))?;

        let Some(user) = user else {
            debug!(identifier = %mask_identifier(identifier), "Login rejected: unknown identifier");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.verify(&user.password_hash, password).await {
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn open_session(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.issuer.sign(user)?;
        let refresh_token = self
            .bounded(
                "refresh issue",
                self.ledger.issue(user.id, self.config.refresh_token_ttl),
            )
            .await??;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Run a store call under the configured timeout
    async fn bounded<F: Future>(&self, operation: &'static str, call: F) -> DomainResult<F::Output> {
        tokio::time::timeout(self.config.store_timeout, call)
            .await
            .map_err(|_| {
                warn!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Store call timed out"
                );
                DomainError::Unavailable { operation }
            })
    }
}
