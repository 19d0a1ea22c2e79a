//! Audit trail of operator actions.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AuditEntryId, ClientId, UserEmail};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuditAction {
    ClientCreated,
    ClientUpdated,
    ClientDeleted,
    UserDeleted,
    ExportCsv,
    ExportExcel,
    Other(String),
}

impl AuditAction {
    pub fn as_str(&self) -> &str {
        match self {
            AuditAction::ClientCreated => "CLIENTE_CRIADO",
            AuditAction::ClientUpdated => "CLIENTE_ATUALIZADO",
            AuditAction::ClientDeleted => "CLIENTE_DELETADO",
            AuditAction::UserDeleted => "USUARIO_DELETADO",
            AuditAction::ExportCsv => "EXPORTAR_CSV",
            AuditAction::ExportExcel => "EXPORTAR_EXCEL",
            AuditAction::Other(s) => s,
        }
    }
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AuditAction {
    fn from(s: &str) -> Self {
        match s {
            "CLIENTE_CRIADO" => AuditAction::ClientCreated,
            "CLIENTE_ATUALIZADO" => AuditAction::ClientUpdated,
            "CLIENTE_DELETADO" => AuditAction::ClientDeleted,
            "USUARIO_DELETADO" => AuditAction::UserDeleted,
            "EXPORTAR_CSV" => AuditAction::ExportCsv,
            "EXPORTAR_EXCEL" => AuditAction::ExportExcel,
            _ => AuditAction::Other(s.to_string()),
        }
    }
}

impl From<String> for AuditAction {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub user_email: UserEmail,
    pub action: AuditAction,
    /// Client affected by the action, when there is one.
    pub client_id: Option<ClientId>,
    pub details: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAuditEntry {
    pub user_email: UserEmail,
    pub action: AuditAction,
    pub client_id: Option<ClientId>,
    pub details: String,
}

impl NewAuditEntry {
    #[must_use]
    pub fn new(
        user_email: UserEmail,
        action: AuditAction,
        client_id: Option<ClientId>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            user_email,
            action,
            client_id,
            details: details.into(),
        }
    }
}
