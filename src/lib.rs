//! # Blog Core
//!
//! Account, session, and password-recovery core for a blogging application.
//!
//! This library implements the security-sensitive center of the application:
//! salted password hashing, signed and expiring password-reset tokens, and a
//! session-based authentication model. Everything with an HTTP shape (routes,
//! templates, cookies, file uploads, mail transport) lives in a thin adapter
//! layer outside this crate and talks to it through plain methods with typed
//! results.
//!
//! ## Core Modules
//!
//! - [`auth`]: Password hashing, session tokens, and the [`auth::AuthSessionManager`]
//! - [`reset`]: Stateless signed password-reset tokens and out-of-band delivery
//! - [`account`]: Account records and the [`account::AccountDirectory`] storage trait
//! - [`posts`]: Blog posts tied to authors, with paginated listing
//! - [`db`]: PostgreSQL connection pooling for the bundled repository impls
//!
//! ## Example
//!
//! ```no_run
//! use blog_core::account::{MemoryAccountDirectory, NewAccount};
//! use blog_core::auth::AuthSessionManager;
//! use blog_core::config::CoreConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let directory = Arc::new(MemoryAccountDirectory::new());
//!     let mut auth = AuthSessionManager::new(directory, &CoreConfig::development())?;
//!
//!     auth
//!         .register(NewAccount {
//!             username: "alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             password: "correct horse battery".to_string(),
//!         })
//!         .await?;
//!
//!     let account = auth.authenticate("alice@example.com", "correct horse battery").await?;
//!     let session = auth.establish(&account, false)?;
//!     println!("session for {} expires {}", account.username, session.expires_at);
//!     Ok(())
//! }
//! ```

/// Account records and keyed storage.
pub mod account;
pub use account::{Account, AccountDirectory, AccountId, MemoryAccountDirectory, NewAccount};

/// Password hashing, sessions, and the authentication manager.
pub mod auth;
pub use auth::{AuthError, AuthResult, AuthSessionManager, PasswordHasher, Session};

/// Signed, expiring password-reset tokens.
pub mod reset;
pub use reset::{ResetTokenCodec, TokenDelivery};

/// Blog posts and paginated listing.
pub mod posts;

/// PostgreSQL connection pooling.
pub mod db;

/// Process configuration.
pub mod config;
pub use config::CoreConfig;
