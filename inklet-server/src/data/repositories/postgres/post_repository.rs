use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::category::Category;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::{Role, User};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let sql = format!("{POST_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }
}

/// One flat row per post, author and category joined in.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: i64,
    author_username: String,
    author_email: String,
    author_role: String,
    author_created_at: DateTime<Utc>,
    category_id: i64,
    category_name: String,
}

const POST_SELECT: &str = r#"
SELECT p.id, p.title, p.body, p.created_at, p.updated_at,
       u.id AS author_id, u.username AS author_username, u.email AS author_email,
       u.role AS author_role, u.created_at AS author_created_at,
       c.id AS category_id, c.name AS category_name
FROM posts p
JOIN users u ON u.id = p.author_id
JOIN categories c ON c.id = p.category_id
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (title, body, author_id, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.author_id)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        self.fetch_post(id)
            .await?
            .ok_or_else(|| DomainError::Unexpected(format!("created post {id} not readable")))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        self.fetch_post(id).await
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        // COALESCE keeps columns whose patch field is absent untouched.
        let updated = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                body = COALESCE($3, body),
                category_id = COALESCE($4, category_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.body)
        .bind(patch.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        match updated {
            Some(id) => self.fetch_post(id).await,
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let sql = format!("{POST_SELECT} ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let author = User::new(
        row.author_id,
        row.author_username,
        row.author_email,
        Role::from_db(&row.author_role),
        row.author_created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    let category = Category::new(row.category_id, row.category_name)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Post::new(
        row.id,
        row.title,
        row.body,
        author,
        category,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return match db_err.constraint() {
            Some("posts_author_id_fkey") => DomainError::NotFound("author".to_string()),
            _ => DomainError::Validation {
                field: "category_id",
                message: "must reference an existing category",
            },
        };
    }
    DomainError::Unexpected(err.to_string())
}
