use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: i64,
}

/// Partial update: `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) category_id: Option<i64>,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
}
