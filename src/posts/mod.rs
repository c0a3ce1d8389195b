//! Blog posts tied to authors, with paginated listing.
//!
//! Thin by design: rendering, form validation, and route wiring live outside
//! the core. The repository trait mirrors the account directory so the same
//! storage seam covers both entities.

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::{PostError, PostResult};
pub use models::{NewPost, Page, Post, PostId};
pub use repository::{MemoryPostRepository, PgPostRepository, PostRepository};
