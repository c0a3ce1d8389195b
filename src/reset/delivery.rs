//! Out-of-band delivery of reset tokens.

use async_trait::async_trait;
use thiserror::Error;

use crate::account::Account;

/// Delivery errors
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The channel could not hand the token to the recipient
    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// Channel that carries a reset token to an account's registered contact
///
/// Transport mechanics (SMTP and friends) live outside the core. A delivery
/// failure does not roll back token issuance; the token stays valid for its
/// window either way.
#[async_trait]
pub trait TokenDelivery: Send + Sync {
    async fn deliver(
        &self,
        account: &Account,
        token: &str,
        base_url: &str,
    ) -> Result<(), DeliveryError>;
}

/// Delivery channel that writes the reset link to the log
///
/// Useful in development and tests, where no mail transport is wired up.
pub struct LogDelivery;

#[async_trait]
impl TokenDelivery for LogDelivery {
    async fn deliver(
        &self,
        account: &Account,
        token: &str,
        base_url: &str,
    ) -> Result<(), DeliveryError> {
        log::info!(
            "password reset for {}: {}/reset_password/{}",
            account.email,
            base_url.trim_end_matches('/'),
            token
        );
        Ok(())
    }
}
