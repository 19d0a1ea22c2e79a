use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::audit::{AuditEntry as DomainAuditEntry, NewAuditEntry as DomainNewAuditEntry};
use crate::domain::types::{AuditEntryId, ClientId, TypeConstraintError, UserEmail};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::audit_log)]
pub struct AuditEntry {
    pub id: i32,
    pub user_email: String,
    pub action: String,
    pub client_id: Option<i32>,
    pub details: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_log)]
pub struct NewAuditEntry<'a> {
    pub user_email: &'a str,
    pub action: &'a str,
    pub client_id: Option<i32>,
    pub details: &'a str,
}

impl TryFrom<AuditEntry> for DomainAuditEntry {
    type Error = TypeConstraintError;

    fn try_from(row: AuditEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AuditEntryId::new(row.id)?,
            user_email: UserEmail::new(row.user_email)?,
            action: row.action.into(),
            client_id: row.client_id.map(ClientId::new).transpose()?,
            details: row.details,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAuditEntry> for NewAuditEntry<'a> {
    fn from(entry: &'a DomainNewAuditEntry) -> Self {
        Self {
            user_email: entry.user_email.as_str(),
            action: entry.action.as_str(),
            client_id: entry.client_id.map(ClientId::get),
            details: entry.details.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::AuditAction;
    use chrono::NaiveDate;

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn unknown_actions_survive_the_round_trip() {
        let row = AuditEntry {
            id: 1,
            user_email: "Admin@Example.com".to_string(),
            action: "IMPORTAR_PLANILHA".to_string(),
            client_id: None,
            details: String::new(),
            created_at: epoch(),
        };
        let entry = DomainAuditEntry::try_from(row).unwrap();
        assert_eq!(entry.user_email.as_str(), "admin@example.com");
        assert_eq!(entry.action, AuditAction::Other("IMPORTAR_PLANILHA".to_string()));
    }

    #[test]
    fn insertable_uses_wire_action_names() {
        let entry = DomainNewAuditEntry::new(
            UserEmail::new("admin@example.com").unwrap(),
            AuditAction::ClientDeleted,
            ClientId::new(4).ok(),
            "Cliente excluído: Silva Ltda",
        );
        let row = NewAuditEntry::from(&entry);
        assert_eq!(row.action, "CLIENTE_DELETADO");
        assert_eq!(row.client_id, Some(4));
    }
}
