//! Audit trail writes and the administrator's audit log view.

use crate::domain::audit::{AuditAction, AuditEntry, NewAuditEntry};
use crate::domain::types::ClientId;
use crate::domain::user::User;
use crate::repository::{AuditLogReader, AuditLogWriter};
use crate::services::{ServiceResult, ensure_admin, ensure_user};

/// Maximum number of entries shown in the audit log.
pub const AUDIT_LOG_LIMIT: usize = 100;

/// Export formats whose use is recorded in the audit trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl From<ExportFormat> for AuditAction {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => AuditAction::ExportCsv,
            ExportFormat::Excel => AuditAction::ExportExcel,
        }
    }
}

/// Records an action on behalf of `user`.
///
/// Nothing is written when no user is loaded. A failed write is logged and
/// swallowed since the audited mutation already happened.
pub fn record<R>(
    repo: &R,
    user: Option<&User>,
    action: AuditAction,
    client_id: Option<ClientId>,
    details: &str,
) where
    R: AuditLogWriter + ?Sized,
{
    let Some(user) = user else {
        log::debug!("Skipping audit entry {action}: no user loaded");
        return;
    };

    let entry = NewAuditEntry::new(user.email.clone(), action, client_id, details);
    if let Err(err) = repo.create_audit_entry(&entry) {
        log::error!("Failed to record audit entry {}: {err}", entry.action);
    }
}

/// Newest audit entries, administrators only.
pub fn list_audit_log<R>(repo: &R, user: Option<&User>) -> ServiceResult<Vec<AuditEntry>>
where
    R: AuditLogReader + ?Sized,
{
    ensure_admin(user)?;

    let entries = repo.list_audit_entries(AUDIT_LOG_LIMIT).map_err(|err| {
        log::error!("Failed to list audit entries: {err}");
        err
    })?;

    Ok(entries)
}

/// Records that the user exported `count` clients in the given format.
pub fn record_export<R>(
    repo: &R,
    user: Option<&User>,
    format: ExportFormat,
    count: usize,
) -> ServiceResult<()>
where
    R: AuditLogWriter + ?Sized,
{
    let user = ensure_user(user)?;
    record(
        repo,
        Some(user),
        format.into(),
        None,
        &format!("{count} clientes exportados"),
    );
    Ok(())
}
