//! Post repository trait and implementations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;

use super::errors::{PostError, PostResult};
use super::models::{NewPost, Page, Post, PostId};
use crate::account::AccountId;

/// Trait for post storage operations
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post
    async fn insert(&self, new: NewPost) -> PostResult<Post>;

    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> PostResult<Option<Post>>;

    /// List posts newest-first, one page at a time (`page` is 1-based)
    async fn list_page(&self, page: u32, per_page: u32) -> PostResult<Page<Post>>;

    /// List one author's posts newest-first, one page at a time
    async fn list_by_author(
        &self,
        author_id: AccountId,
        page: u32,
        per_page: u32,
    ) -> PostResult<Page<Post>>;
}

fn page_offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

/// Default PostgreSQL implementation of `PostRepository`
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: &sqlx::postgres::PgRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        author_id: row.get("author_id"),
        posted_at: row.get::<chrono::NaiveDateTime, _>("posted_at").and_utc(),
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn insert(&self, new: NewPost) -> PostResult<Post> {
        let row = sqlx::query(
            "INSERT INTO posts (title, body, author_id)
             VALUES ($1, $2, $3)
             RETURNING id, title, body, author_id, posted_at",
        )
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                PostError::UnknownAuthor(new.author_id)
            }
            _ => PostError::Database(error),
        })?;

        Ok(row_to_post(&row))
    }

    async fn find_by_id(&self, id: PostId) -> PostResult<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, title, body, author_id, posted_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_post))
    }

    async fn list_page(&self, page: u32, per_page: u32) -> PostResult<Page<Post>> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS count FROM posts")
            .fetch_one(&self.pool)
            .await?
            .get("count");

        let rows = sqlx::query(
            "SELECT id, title, body, author_id, posted_at
             FROM posts ORDER BY posted_at DESC, id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(per_page))
        .bind(page_offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items: rows.iter().map(row_to_post).collect(),
            page,
            per_page,
            total: total as u64,
        })
    }

    async fn list_by_author(
        &self,
        author_id: AccountId,
        page: u32,
        per_page: u32,
    ) -> PostResult<Page<Post>> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?
            .get("count");

        let rows = sqlx::query(
            "SELECT id, title, body, author_id, posted_at
             FROM posts WHERE author_id = $1
             ORDER BY posted_at DESC, id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(author_id)
        .bind(i64::from(per_page))
        .bind(page_offset(page, per_page))
        .fetch_all(&self.pool)
        .await?;

        Ok(Page {
            items: rows.iter().map(row_to_post).collect(),
            page,
            per_page,
            total: total as u64,
        })
    }
}

/// In-memory implementation of `PostRepository` for tests and examples
#[derive(Default)]
pub struct MemoryPostRepository {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: PostId,
    posts: HashMap<PostId, Post>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_page(posts: Vec<Post>, page: u32, per_page: u32) -> Page<Post> {
        let mut sorted = posts;
        // Newest first; id breaks ties for posts sharing a timestamp
        sorted.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then(b.id.cmp(&a.id)));

        let total = sorted.len() as u64;
        let start = page_offset(page, per_page) as usize;
        let items = sorted
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Page {
            items,
            page,
            per_page,
            total,
        }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, new: NewPost) -> PostResult<Post> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;

        let post = Post {
            id: inner.next_id,
            title: new.title,
            body: new.body,
            author_id: new.author_id,
            posted_at: Utc::now(),
        };
        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> PostResult<Option<Post>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.posts.get(&id).cloned())
    }

    async fn list_page(&self, page: u32, per_page: u32) -> PostResult<Page<Post>> {
        let inner = self.inner.lock().unwrap();
        Ok(Self::collect_page(
            inner.posts.values().cloned().collect(),
            page,
            per_page,
        ))
    }

    async fn list_by_author(
        &self,
        author_id: AccountId,
        page: u32,
        per_page: u32,
    ) -> PostResult<Page<Post>> {
        let inner = self.inner.lock().unwrap();
        Ok(Self::collect_page(
            inner
                .posts
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
            page,
            per_page,
        ))
    }
}
