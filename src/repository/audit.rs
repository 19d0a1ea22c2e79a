use diesel::prelude::*;

use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::models::audit::{AuditEntry as DbAuditEntry, NewAuditEntry as DbNewAuditEntry};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AuditLogReader, AuditLogWriter, DieselRepository};

impl AuditLogReader for DieselRepository {
    fn list_audit_entries(&self, limit: usize) -> RepositoryResult<Vec<AuditEntry>> {
        use crate::schema::audit_log;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut conn = self.conn()?;
        let rows = audit_log::table
            .order((audit_log::created_at.desc(), audit_log::id.desc()))
            .limit(limit)
            .select(DbAuditEntry::as_select())
            .load::<DbAuditEntry>(&mut conn)?;

        rows.into_iter()
            .map(|row| AuditEntry::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl AuditLogWriter for DieselRepository {
    fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<AuditEntry> {
        use crate::schema::audit_log;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(audit_log::table)
            .values(DbNewAuditEntry::from(entry))
            .returning(DbAuditEntry::as_returning())
            .get_result::<DbAuditEntry>(&mut conn)?;

        Ok(AuditEntry::try_from(row)?)
    }
}
