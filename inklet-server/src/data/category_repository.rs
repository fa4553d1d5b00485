use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewCategory {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryPatch {
    pub(crate) name: Option<String>,
}

#[async_trait]
pub(crate) trait CategoryRepository: Send + Sync {
    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError>;
    async fn update_category(
        &self,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, DomainError>;
    /// Fails with `Conflict` while posts still reference the category.
    async fn delete_category(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    async fn category_exists(&self, id: i64) -> Result<bool, DomainError>;
}
