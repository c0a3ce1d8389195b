//! Account records and keyed storage.
//!
//! An [`Account`] is the durable root entity: unique id, unique username,
//! unique email, a stored password hash, and an optional avatar reference.
//! Storage goes through the [`AccountDirectory`] trait so the authentication
//! core never touches persistence mechanics directly.

pub mod directory;
pub mod models;

pub use directory::{AccountDirectory, MemoryAccountDirectory, PgAccountDirectory};
pub use models::{Account, AccountId, AccountUpdate, NewAccount};
