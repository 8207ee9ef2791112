/// Post persistence boundary
///
/// `PostStore` is the trait the service layer depends on; `SqlxPostStore`
/// is the Postgres implementation. Identifier and timestamp assignment
/// happen atomically inside the INSERT.
use crate::error::Result;
use crate::models::Post;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post. The store assigns id and creation timestamp.
    async fn create(&self, author_id: &str, content: &str) -> Result<Post>;

    /// Most recent posts across all authors, newest first, bounded by `limit`.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>>;

    /// All posts by one author, newest first.
    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>>;
}

pub struct SqlxPostStore {
    pool: PgPool,
}

impl SqlxPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for SqlxPostStore {
    async fn create(&self, author_id: &str, content: &str) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, content)
            VALUES ($1, $2)
            RETURNING id, author_id, content, created_at
            "#,
        )
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>> {
        // id DESC breaks created_at ties in insertion order
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
