use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::category_repository::{CategoryPatch, CategoryRepository, NewCategory};
use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&input.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        map_row_to_category(row)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_category_db_error)?;

        row.map(map_row_to_category).transpose()
    }

    async fn update_category(
        &self,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        row.map(map_row_to_category).transpose()
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_category_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows =
            sqlx::query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_category_db_error)?;

        rows.into_iter().map(map_row_to_category).collect()
    }

    async fn category_exists(&self, id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_category_db_error)
    }
}

fn map_row_to_category(row: CategoryRow) -> Result<Category, DomainError> {
    Category::new(row.id, row.name).map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_category_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        // ON DELETE RESTRICT on posts.category_id.
        return DomainError::Conflict("category is referenced by existing posts".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
