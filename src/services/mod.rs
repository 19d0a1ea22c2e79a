//! Orchestration over the repository traits.
//!
//! Every service is generic over the traits it needs so it can run against the
//! Diesel adapter or a mock.

use thiserror::Error;

use crate::domain::user::User;
use crate::repository::errors::RepositoryError;

pub mod audit;
pub mod client;
pub mod main;
pub mod notifications;
pub mod users;

#[derive(Debug, Error)]
/// Errors surfaced by the service layer.
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("form error: {0}")]
    Form(String),
    #[error("type constraint violated: {0}")]
    TypeConstraint(String),
    #[error("repository error: {0}")]
    Repository(RepositoryError),
    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fails with [`ServiceError::Unauthorized`] when no user session is loaded.
pub fn ensure_user(user: Option<&User>) -> ServiceResult<&User> {
    match user {
        Some(user) if user.active => Ok(user),
        _ => Err(ServiceError::Unauthorized),
    }
}

/// Like [`ensure_user`], additionally requiring the administrator role.
pub fn ensure_admin(user: Option<&User>) -> ServiceResult<&User> {
    let user = ensure_user(user)?;
    if user.is_admin() {
        Ok(user)
    } else {
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::types::{CompanyName, UserEmail, UserName};
    use crate::domain::user::{Role, User};

    pub fn user(email: &str, role: Role) -> User {
        User {
            email: UserEmail::new(email).unwrap(),
            name: UserName::new("Operador").unwrap(),
            company: CompanyName::new("Matriz").unwrap(),
            role,
            active: true,
        }
    }

    pub fn admin() -> User {
        user("admin@example.com", Role::Administrator)
    }

    pub fn analyst() -> User {
        user("ana@example.com", Role::Other("Analista".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{admin, analyst};
    use super::*;

    #[test]
    fn missing_or_inactive_user_is_unauthorized() {
        assert!(matches!(ensure_user(None), Err(ServiceError::Unauthorized)));

        let mut inactive = analyst();
        inactive.active = false;
        assert!(matches!(
            ensure_user(Some(&inactive)),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn admin_check_requires_the_role() {
        let admin = admin();
        let analyst = analyst();

        assert!(ensure_admin(Some(&admin)).is_ok());
        assert!(ensure_user(Some(&analyst)).is_ok());
        assert!(matches!(
            ensure_admin(Some(&analyst)),
            Err(ServiceError::Unauthorized)
        ));
    }
}
