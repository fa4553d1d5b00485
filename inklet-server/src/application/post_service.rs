use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct PostService<P: PostRepository, C: CategoryRepository> {
    posts: P,
    categories: C,
}

impl<P: PostRepository, C: CategoryRepository> PostService<P, C> {
    pub(crate) fn new(posts: P, categories: C) -> Self {
        Self { posts, categories }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        self.ensure_category_exists(req.category_id).await?;

        let new_post = NewPost {
            title: req.title,
            body: req.body,
            author_id,
            category_id: req.category_id,
        };
        self.posts.create_post(new_post).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn update_post(
        &self,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        if let Some(category_id) = req.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let patch = PostPatch {
            title: req.title,
            body: req.body,
            category_id: req.category_id,
        };
        self.posts
            .update_post(post_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))
    }

    pub(crate) async fn delete_post(&self, post_id: i64) -> Result<(), DomainError> {
        let deleted = self.posts.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts().await
    }

    /// The category reference must resolve at the moment of creation/update;
    /// reported as a field error, same shape as the payload constraints.
    async fn ensure_category_exists(&self, category_id: i64) -> Result<(), DomainError> {
        if !self.categories.category_exists(category_id).await? {
            return Err(DomainError::Validation {
                field: "category_id",
                message: "must reference an existing category",
            });
        }
        Ok(())
    }
}
