//! Authentication module providing password hashing, sessions, and account flows.
//!
//! This module implements the credential side of the core:
//! - Argon2id password hashing with tunable work factors
//! - Signed, caller-held session tokens with short and "remember me" lifetimes
//! - Registration, login, logout, account update, and the password-reset flow
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
//!     let account = auth
//!         .register(NewAccount {
//!             username: "alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             password: "correct horse battery".to_string(),
//!         })
//!         .await?;
//!
//!     let session = auth.establish(&account, true)?;
//!     println!("session expires {}", session.expires_at);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod password;
pub mod session;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthSessionManager;
pub use password::{HasherConfig, PasswordHasher};
pub use session::{Session, SessionClaims, SessionCodec};
