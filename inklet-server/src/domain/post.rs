use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::error::DomainError;
use super::user::User;

/// A post as exposed by the API: always carries its author and category.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) author: User,
    pub(crate) category: Category,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        body: impl Into<String>,
        author: User,
        category: Category,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let title = normalize_title(&title.into())?;
        let body = normalize_body(&body.into())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title,
            body,
            author,
            category,
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) body: String,
    pub(crate) category_id: i64,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            body: normalize_body(&self.body)?,
            category_id: validate_category_id(self.category_id)?,
        })
    }
}

/// Partial update: absent fields are skipped, present fields must satisfy the
/// same constraints as on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) category_id: Option<i64>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: self.title.as_deref().map(normalize_title).transpose()?,
            body: self.body.as_deref().map(normalize_body).transpose()?,
            category_id: self.category_id.map(validate_category_id).transpose()?,
        })
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.len() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_body(body: &str) -> Result<String, DomainError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(DomainError::Validation {
            field: "body",
            message: "must not be empty",
        });
    }
    Ok(body.to_string())
}

fn validate_category_id(category_id: i64) -> Result<i64, DomainError> {
    if category_id <= 0 {
        return Err(DomainError::Validation {
            field: "category_id",
            message: "must reference an existing category",
        });
    }
    Ok(category_id)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{CreatePostRequest, Post, UpdatePostRequest};
    use crate::domain::category::Category;
    use crate::domain::error::DomainError;
    use crate::domain::user::{Role, User};

    #[test]
    fn create_request_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            body: "valid body".to_string(),
            category_id: 1,
        };
        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_request_rejects_overlong_title() {
        let req = CreatePostRequest {
            title: "x".repeat(256),
            body: "valid body".to_string(),
            category_id: 1,
        };
        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_request_rejects_non_positive_category() {
        let req = CreatePostRequest {
            title: "Title".to_string(),
            body: "Body".to_string(),
            category_id: 0,
        };
        let err = req.validate().expect_err("category_id must be rejected");
        assert_validation_field(err, "category_id");
    }

    #[test]
    fn create_request_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            body: "  body  ".to_string(),
            category_id: 3,
        };
        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.body, "body");
        assert_eq!(validated.category_id, 3);
    }

    #[test]
    fn update_request_skips_absent_fields() {
        let req = UpdatePostRequest {
            title: Some("new title".to_string()),
            body: None,
            category_id: None,
        };
        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title.as_deref(), Some("new title"));
        assert!(validated.body.is_none());
        assert!(validated.category_id.is_none());
    }

    #[test]
    fn update_request_rejects_present_but_empty_body() {
        let req = UpdatePostRequest {
            title: None,
            body: Some("   ".to_string()),
            category_id: None,
        };
        let err = req.validate().expect_err("body must be rejected");
        assert_validation_field(err, "body");
    }

    #[test]
    fn post_new_normalizes_and_builds_post() {
        let created_at = Utc::now();
        let updated_at = created_at + Duration::seconds(1);

        let post = Post::new(
            1,
            "  Title  ",
            "  Body  ",
            sample_author(),
            sample_category(),
            created_at,
            updated_at,
        )
        .expect("post should be created");

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Title");
        assert_eq!(post.body, "Body");
        assert_eq!(post.author.id, 10);
        assert_eq!(post.category.id, 2);
    }

    #[test]
    fn post_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(1);

        let err = Post::new(
            1,
            "Title",
            "Body",
            sample_author(),
            sample_category(),
            created_at,
            updated_at,
        )
        .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn sample_author() -> User {
        User::new(10, "author", "author@example.com", Role::Admin, Utc::now())
            .expect("sample user must be valid")
    }

    fn sample_category() -> Category {
        Category::new(2, "Tech").expect("sample category must be valid")
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
