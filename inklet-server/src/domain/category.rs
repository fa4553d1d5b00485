use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl Category {
    pub(crate) fn new(id: i64, name: impl Into<String>) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let name = normalize_name(&name.into())?;
        Ok(Self { id, name })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCategoryRequest {
    pub(crate) name: String,
}

impl CreateCategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_name(&self.name)?,
        })
    }
}

/// Absent fields are skipped, present fields must satisfy the same
/// constraints as on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateCategoryRequest {
    pub(crate) name: Option<String>,
}

impl UpdateCategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: self.name.as_deref().map(normalize_name).transpose()?,
        })
    }
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.len() > 255 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..255 chars",
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Category, CreateCategoryRequest, UpdateCategoryRequest};
    use crate::domain::error::DomainError;

    #[test]
    fn create_request_rejects_blank_name() {
        let req = CreateCategoryRequest {
            name: "   ".to_string(),
        };
        let err = req.validate().expect_err("name must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "name", .. }));
    }

    #[test]
    fn create_request_rejects_overlong_name() {
        let req = CreateCategoryRequest {
            name: "x".repeat(256),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_request_trims_name() {
        let req = CreateCategoryRequest {
            name: "  Tech  ".to_string(),
        };
        let validated = req.validate().expect("must validate");
        assert_eq!(validated.name, "Tech");
    }

    #[test]
    fn update_request_skips_absent_name() {
        let req = UpdateCategoryRequest { name: None };
        let validated = req.validate().expect("absent field must be skipped");
        assert!(validated.name.is_none());
    }

    #[test]
    fn update_request_rejects_present_but_blank_name() {
        let req = UpdateCategoryRequest {
            name: Some("  ".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn category_new_rejects_non_positive_id() {
        assert!(Category::new(0, "Tech").is_err());
        assert!(Category::new(1, "Tech").is_ok());
    }
}
