use crate::data::category_repository::{CategoryPatch, CategoryRepository, NewCategory};
use crate::domain::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::error::DomainError;

pub(crate) struct CategoryService<C: CategoryRepository> {
    repo: C,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub(crate) fn new(repo: C) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_category(
        &self,
        req: CreateCategoryRequest,
    ) -> Result<Category, DomainError> {
        let req = req.validate()?;
        self.repo.create_category(NewCategory { name: req.name }).await
    }

    pub(crate) async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        self.repo
            .get_category(id)
            .await?
            .ok_or(DomainError::NotFound(format!("category id: {id}")))
    }

    pub(crate) async fn update_category(
        &self,
        id: i64,
        req: UpdateCategoryRequest,
    ) -> Result<Category, DomainError> {
        let req = req.validate()?;
        let patch = CategoryPatch { name: req.name };
        self.repo
            .update_category(id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("category id: {id}")))
    }

    pub(crate) async fn delete_category(&self, id: i64) -> Result<(), DomainError> {
        let deleted = self.repo.delete_category(id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("category id: {id}")));
        }
        Ok(())
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::CategoryService;
    use crate::data::category_repository::{CategoryPatch, CategoryRepository, NewCategory};
    use crate::domain::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
    use crate::domain::error::DomainError;

    #[derive(Clone)]
    struct FakeCategoryRepo {
        created_input: Arc<Mutex<Option<NewCategory>>>,
        category_for_get: Arc<Mutex<Option<Category>>>,
        update_result: Arc<Mutex<Option<Category>>>,
        update_call: Arc<Mutex<Option<(i64, CategoryPatch)>>>,
        delete_result: Arc<Mutex<Result<bool, DomainError>>>,
        list_result: Arc<Mutex<Vec<Category>>>,
    }

    impl FakeCategoryRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                category_for_get: Arc::new(Mutex::new(None)),
                update_result: Arc::new(Mutex::new(None)),
                update_call: Arc::new(Mutex::new(None)),
                delete_result: Arc::new(Mutex::new(Ok(true))),
                list_result: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn take_created_input(&self) -> Option<NewCategory> {
            self.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl CategoryRepository for FakeCategoryRepo {
        async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_category(1, &input.name))
        }

        async fn get_category(&self, _id: i64) -> Result<Option<Category>, DomainError> {
            Ok(self
                .category_for_get
                .lock()
                .expect("category_for_get mutex poisoned")
                .clone())
        }

        async fn update_category(
            &self,
            id: i64,
            patch: CategoryPatch,
        ) -> Result<Option<Category>, DomainError> {
            *self.update_call.lock().expect("update_call mutex poisoned") = Some((id, patch));
            Ok(self
                .update_result
                .lock()
                .expect("update_result mutex poisoned")
                .clone())
        }

        async fn delete_category(&self, _id: i64) -> Result<bool, DomainError> {
            match &*self
                .delete_result
                .lock()
                .expect("delete_result mutex poisoned")
            {
                Ok(deleted) => Ok(*deleted),
                Err(DomainError::Conflict(msg)) => Err(DomainError::Conflict(msg.clone())),
                Err(_) => Err(DomainError::Unexpected("unexpected".to_string())),
            }
        }

        async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
            Ok(self
                .list_result
                .lock()
                .expect("list_result mutex poisoned")
                .clone())
        }

        async fn category_exists(&self, _id: i64) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn create_category_normalizes_name_before_repo_call() {
        let repo = FakeCategoryRepo::new();
        let service = CategoryService::new(repo.clone());

        let req = CreateCategoryRequest {
            name: "  Tech  ".to_string(),
        };
        let created = service
            .create_category(req)
            .await
            .expect("create must succeed");
        assert_eq!(created.name, "Tech");

        let input = repo
            .take_created_input()
            .expect("repo input must be captured");
        assert_eq!(input.name, "Tech");
    }

    #[tokio::test]
    async fn create_category_rejects_blank_name_without_persisting() {
        let repo = FakeCategoryRepo::new();
        let service = CategoryService::new(repo.clone());

        let req = CreateCategoryRequest {
            name: "   ".to_string(),
        };
        let err = service
            .create_category(req)
            .await
            .expect_err("blank name must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "name", .. }));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn get_category_returns_not_found_when_missing() {
        let service = CategoryService::new(FakeCategoryRepo::new());
        let err = service
            .get_category(42)
            .await
            .expect_err("category must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_category_forwards_only_present_fields() {
        let repo = FakeCategoryRepo::new();
        *repo
            .update_result
            .lock()
            .expect("update_result mutex poisoned") = Some(sample_category(5, "Updated"));

        let service = CategoryService::new(repo.clone());
        let req = UpdateCategoryRequest { name: None };
        let updated = service
            .update_category(5, req)
            .await
            .expect("update must succeed");
        assert_eq!(updated.id, 5);

        let (id, patch) = repo
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update call must be captured");
        assert_eq!(id, 5);
        assert!(patch.name.is_none());
    }

    #[tokio::test]
    async fn delete_category_surfaces_conflict() {
        let repo = FakeCategoryRepo::new();
        *repo
            .delete_result
            .lock()
            .expect("delete_result mutex poisoned") =
            Err(DomainError::Conflict("category is referenced".to_string()));

        let service = CategoryService::new(repo);
        let err = service
            .delete_category(1)
            .await
            .expect_err("delete must conflict");
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_category_returns_not_found_when_nothing_deleted() {
        let repo = FakeCategoryRepo::new();
        *repo
            .delete_result
            .lock()
            .expect("delete_result mutex poisoned") = Ok(false);

        let service = CategoryService::new(repo);
        let err = service
            .delete_category(42)
            .await
            .expect_err("missing category must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    fn sample_category(id: i64, name: &str) -> Category {
        Category::new(id, name).expect("sample category must be valid")
    }
}
