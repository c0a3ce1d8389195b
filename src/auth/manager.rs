//! Authentication and session manager implementation.

use std::sync::Arc;

use super::errors::{AuthError, AuthResult};
use super::password::PasswordHasher;
use super::session::{Session, SessionCodec};
use crate::account::{Account, AccountDirectory, AccountId, AccountUpdate, NewAccount};
use crate::config::CoreConfig;
use crate::reset::{ResetTokenCodec, TokenDelivery};

/// Authentication and session manager
///
/// Request-scoped front door of the core: registration, credential checks,
/// session establishment, and the password-reset flow. All collaborators are
/// injected explicitly; there is no ambient application object. The manager
/// holds at most one active session, the one belonging to the current caller.
pub struct AuthSessionManager {
    directory: Arc<dyn AccountDirectory>,
    hasher: PasswordHasher,
    sessions: SessionCodec,
    reset_tokens: ResetTokenCodec,
    current: Option<Session>,
}

impl AuthSessionManager {
    /// Create a new manager from an account directory and core configuration
    ///
    /// # Errors
    ///
    /// * `AuthError::HashingFailed` - Configured hashing work factors are invalid
    pub fn new(directory: Arc<dyn AccountDirectory>, config: &CoreConfig) -> AuthResult<Self> {
        Ok(Self {
            directory,
            hasher: PasswordHasher::new(&config.hasher)?,
            sessions: SessionCodec::new(
                &config.secret_key,
                config.session_secs,
                config.session_remember_secs,
            ),
            reset_tokens: ResetTokenCodec::new(&config.secret_key, config.token_expiry_secs),
            current: None,
        })
    }

    /// Register a new account
    ///
    /// Hashes the plaintext password and persists the account. The plaintext
    /// is never stored.
    ///
    /// # Errors
    ///
    /// * `AuthError::AccountConflict` - Username or email already in use
    pub async fn register(&self, new: NewAccount) -> AuthResult<Account> {
        if self.directory.find_by_username(&new.username).await?.is_some() {
            return Err(AuthError::AccountConflict);
        }
        if self.directory.find_by_email(&new.email).await?.is_some() {
            return Err(AuthError::AccountConflict);
        }

        let password_hash = self.hasher.hash(&new.password)?;
        let account = self
            .directory
            .insert(&new.username, &new.email, &password_hash)
            .await?;

        log::info!("registered account {} ({})", account.id, account.username);
        Ok(account)
    }

    /// Check credentials against the directory
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown email or wrong password;
    ///   the two cases are deliberately indistinguishable
    pub async fn authenticate(&self, email: &str, password: &str) -> AuthResult<Account> {
        let Some(account) = self.directory.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.password_hash) {
            log::warn!("failed login for account {}", account.id);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Establish a session for an authenticated account
    ///
    /// `remember` selects the long configured lifetime; lifetimes are
    /// configuration constants, never derived from request data.
    pub fn establish(&mut self, account: &Account, remember: bool) -> AuthResult<Session> {
        let session = self.sessions.establish(account.id, remember)?;
        log::info!("established session for account {}", account.id);
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Adopt a caller-presented session token
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthorized` - Malformed, tampered, or expired token
    pub fn resume(&mut self, token: &str) -> AuthResult<Session> {
        let session = self.sessions.resume(token)?;
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Resolve the active session to its account
    ///
    /// Returns `None` for anonymous callers: no session, an expired session,
    /// or a session whose account no longer resolves.
    pub async fn current(&self) -> AuthResult<Option<Account>> {
        let Some(session) = &self.current else {
            return Ok(None);
        };
        if session.is_expired() {
            return Ok(None);
        }

        self.directory.find_by_id(session.account_id).await
    }

    /// Drop the active session; idempotent
    pub fn destroy(&mut self) {
        if let Some(session) = self.current.take() {
            log::info!("destroyed session for account {}", session.account_id);
        }
    }

    /// Update the profile fields of an account
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthorized` - Caller is not authenticated as this account
    /// * `AuthError::AccountConflict` - New username or email already in use
    pub async fn update_account(
        &self,
        account_id: AccountId,
        update: AccountUpdate,
    ) -> AuthResult<Account> {
        let mut account = self.require_account(account_id).await?;

        if let Some(username) = update.username
            && username != account.username
        {
            if self.directory.find_by_username(&username).await?.is_some() {
                return Err(AuthError::AccountConflict);
            }
            account.username = username;
        }
        if let Some(email) = update.email
            && email != account.email
        {
            if self.directory.find_by_email(&email).await?.is_some() {
                return Err(AuthError::AccountConflict);
            }
            account.email = email;
        }
        if let Some(avatar) = update.avatar {
            account.avatar = Some(avatar);
        }

        self.directory.update(&account).await?;
        Ok(account)
    }

    /// Change an account's password, re-verifying the current one
    ///
    /// # Errors
    ///
    /// * `AuthError::Unauthorized` - Caller is not authenticated as this account
    /// * `AuthError::InvalidCredentials` - Current password does not verify
    pub async fn change_password(
        &self,
        account_id: AccountId,
        current_password: &str,
        new_password: &str,
    ) -> AuthResult<()> {
        let mut account = self.require_account(account_id).await?;

        if !self.hasher.verify(current_password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        account.password_hash = self.hasher.hash(new_password)?;
        self.directory.update(&account).await?;
        log::info!("changed password for account {}", account.id);
        Ok(())
    }

    /// Mint a reset token for the account registered under `email` and hand
    /// it to the delivery channel
    ///
    /// A delivery failure is logged but does not invalidate the issued token;
    /// token validity is a function of signature and time only.
    ///
    /// # Errors
    ///
    /// * `AuthError::NotFound` - No account registered under this email
    pub async fn request_password_reset(
        &self,
        email: &str,
        delivery: &dyn TokenDelivery,
        base_url: &str,
    ) -> AuthResult<String> {
        let Some(account) = self.directory.find_by_email(email).await? else {
            return Err(AuthError::NotFound);
        };

        let token = self.reset_tokens.issue(account.id)?;
        if let Err(error) = delivery.deliver(&account, &token, base_url).await {
            log::warn!(
                "reset token delivery failed for account {}: {error}",
                account.id
            );
        }

        Ok(token)
    }

    /// Verify a reset token and store a new password hash for its account
    ///
    /// The verified token itself authorizes the mutation; no session is
    /// required, since the caller has by definition lost their password.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidOrExpiredToken` - Token fails verification, or
    ///   its account no longer resolves
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> AuthResult<Account> {
        let account_id = self.reset_tokens.verify(token)?;

        let Some(mut account) = self.directory.find_by_id(account_id).await? else {
            return Err(AuthError::InvalidOrExpiredToken);
        };

        account.password_hash = self.hasher.hash(new_password)?;
        self.directory.update(&account).await?;
        log::info!("reset password for account {}", account.id);
        Ok(account)
    }

    /// Authorization gate: the active session must resolve to `account_id`
    async fn require_account(&self, account_id: AccountId) -> AuthResult<Account> {
        match self.current().await? {
            Some(account) if account.id == account_id => Ok(account),
            _ => Err(AuthError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MemoryAccountDirectory;
    use crate::reset::LogDelivery;

    async fn manager_with_alice() -> AuthSessionManager {
        let manager = AuthSessionManager::new(
            Arc::new(MemoryAccountDirectory::new()),
            &CoreConfig::development(),
        )
        .unwrap();

        manager
            .register(NewAccount {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        manager
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let manager = manager_with_alice().await;

        let account = manager.authenticate("a@x.com", "secret1").await.unwrap();
        assert_eq!(account.username, "alice");
        assert_ne!(account.password_hash, "secret1", "Plaintext must never be stored");
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_uniform() {
        let manager = manager_with_alice().await;

        let wrong_password = manager.authenticate("a@x.com", "wrong").await;
        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

        let unknown_email = manager.authenticate("b@x.com", "secret1").await;
        assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_duplicate_conflicts() {
        let manager = manager_with_alice().await;

        let duplicate_username = manager
            .register(NewAccount {
                username: "alice".to_string(),
                email: "other@x.com".to_string(),
                password: "secret2".to_string(),
            })
            .await;
        assert!(matches!(duplicate_username, Err(AuthError::AccountConflict)));

        let duplicate_email = manager
            .register(NewAccount {
                username: "other".to_string(),
                email: "a@x.com".to_string(),
                password: "secret2".to_string(),
            })
            .await;
        assert!(matches!(duplicate_email, Err(AuthError::AccountConflict)));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let mut manager = manager_with_alice().await;
        assert!(manager.current().await.unwrap().is_none(), "Starts anonymous");

        let account = manager.authenticate("a@x.com", "secret1").await.unwrap();
        manager.establish(&account, false).unwrap();

        let current = manager.current().await.unwrap();
        assert_eq!(current.unwrap().id, account.id);

        manager.destroy();
        assert!(manager.current().await.unwrap().is_none());

        // Idempotent with no active session
        manager.destroy();
        assert!(manager.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resume_round_trip() {
        let mut manager = manager_with_alice().await;
        let account = manager.authenticate("a@x.com", "secret1").await.unwrap();
        let session = manager.establish(&account, true).unwrap();
        manager.destroy();

        // A later request presents the same token
        manager.resume(&session.token).unwrap();
        let current = manager.current().await.unwrap();
        assert_eq!(current.unwrap().id, account.id);

        assert!(matches!(
            manager.resume("garbage-token"),
            Err(AuthError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_update_account_requires_matching_session() {
        let mut manager = manager_with_alice().await;
        let account = manager.authenticate("a@x.com", "secret1").await.unwrap();

        let anonymous = manager
            .update_account(account.id, AccountUpdate::default())
            .await;
        assert!(matches!(anonymous, Err(AuthError::Unauthorized)));

        manager.establish(&account, false).unwrap();
        let wrong_account = manager
            .update_account(account.id + 1, AccountUpdate::default())
            .await;
        assert!(matches!(wrong_account, Err(AuthError::Unauthorized)));

        let updated = manager
            .update_account(
                account.id,
                AccountUpdate {
                    username: Some("alice2".to_string()),
                    email: None,
                    avatar: Some("pic.png".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.avatar.as_deref(), Some("pic.png"));
    }

    #[tokio::test]
    async fn test_change_password() {
        let mut manager = manager_with_alice().await;
        let account = manager.authenticate("a@x.com", "secret1").await.unwrap();
        manager.establish(&account, false).unwrap();

        let wrong_current = manager
            .change_password(account.id, "wrong", "secret2")
            .await;
        assert!(matches!(wrong_current, Err(AuthError::InvalidCredentials)));

        manager
            .change_password(account.id, "secret1", "secret2")
            .await
            .unwrap();

        assert!(manager.authenticate("a@x.com", "secret1").await.is_err());
        assert!(manager.authenticate("a@x.com", "secret2").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_flow() {
        let manager = manager_with_alice().await;

        let token = manager
            .request_password_reset("a@x.com", &LogDelivery, "http://localhost:5000")
            .await
            .unwrap();

        let account = manager
            .confirm_password_reset(&token, "secret2")
            .await
            .unwrap();
        assert_eq!(account.username, "alice");

        assert!(manager.authenticate("a@x.com", "secret2").await.is_ok());
        assert!(manager.authenticate("a@x.com", "secret1").await.is_err());
    }

    #[tokio::test]
    async fn test_reset_request_unknown_email() {
        let manager = manager_with_alice().await;

        let result = manager
            .request_password_reset("nobody@x.com", &LogDelivery, "http://localhost:5000")
            .await;
        assert!(matches!(result, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_reset_confirm_rejects_garbage() {
        let manager = manager_with_alice().await;

        let result = manager.confirm_password_reset("garbage", "secret2").await;
        assert!(matches!(result, Err(AuthError::InvalidOrExpiredToken)));
    }
}
