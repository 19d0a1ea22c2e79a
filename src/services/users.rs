//! Operator session and user administration.

use crate::domain::audit::AuditAction;
use crate::domain::types::UserEmail;
use crate::domain::user::User;
use crate::repository::{AuditLogWriter, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, audit, ensure_admin};

/// Loads the operator behind `email`. Unknown or inactive users yield `None`.
pub fn load_current_user<R>(repo: &R, email: &str) -> ServiceResult<Option<User>>
where
    R: UserReader + ?Sized,
{
    let email = UserEmail::new(email)?;

    let user = repo.get_user_by_email(&email).map_err(|err| {
        log::error!("Failed to load user {email}: {err}");
        err
    })?;

    match user {
        Some(user) if user.active => Ok(Some(user)),
        Some(_) => {
            log::warn!("User {email} is inactive");
            Ok(None)
        }
        None => {
            log::warn!("User {email} not found");
            Ok(None)
        }
    }
}

/// All users ordered by e-mail, administrators only.
pub fn list_users<R>(repo: &R, user: Option<&User>) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;

    let users = repo.list_users().map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;

    Ok(users)
}

/// Removes a user account. Administrators cannot remove themselves.
pub fn delete_user<R>(repo: &R, user: Option<&User>, email: &str) -> ServiceResult<()>
where
    R: UserWriter + AuditLogWriter + ?Sized,
{
    let admin = ensure_admin(user)?;
    let email = UserEmail::new(email)?;

    if email == admin.email {
        return Err(ServiceError::Form(
            "Não é possível remover o próprio usuário".to_string(),
        ));
    }

    repo.delete_user(&email).map_err(|err| {
        log::error!("Failed to delete user {email}: {err}");
        err
    })?;

    audit::record(
        repo,
        Some(admin),
        AuditAction::UserDeleted,
        None,
        email.as_str(),
    );

    Ok(())
}
