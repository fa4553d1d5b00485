use super::error::DomainError;
use super::user::Role;

/// Things an actor can be allowed to do. Content management covers every
/// mutating operation on posts and categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Capability {
    ManageContent,
}

/// Single authorization gate for mutating handlers. Called before any payload
/// validation; the unauthenticated case never reaches this point because the
/// bearer middleware rejects it first.
pub(crate) fn require(role: Role, capability: Capability) -> Result<(), DomainError> {
    match capability {
        Capability::ManageContent => {
            if role == Role::Admin {
                Ok(())
            } else {
                Err(DomainError::Forbidden)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, require};
    use crate::domain::error::DomainError;
    use crate::domain::user::Role;

    #[test]
    fn admin_can_manage_content() {
        assert!(require(Role::Admin, Capability::ManageContent).is_ok());
    }

    #[test]
    fn regular_user_is_forbidden() {
        let err = require(Role::User, Capability::ManageContent).expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
    }
}
