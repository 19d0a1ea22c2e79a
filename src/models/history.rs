use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::history::{
    ChangeHistoryEntry as DomainChangeHistoryEntry,
    NewChangeHistoryEntry as DomainNewChangeHistoryEntry,
};
use crate::domain::types::{ClientId, HistoryEntryId, TypeConstraintError, UserEmail};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::change_history)]
pub struct ChangeHistoryEntry {
    pub id: i32,
    pub client_id: i32,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    pub changed_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::change_history)]
pub struct NewChangeHistoryEntry<'a> {
    pub client_id: i32,
    pub field: &'a str,
    pub old_value: Option<&'a str>,
    pub new_value: Option<&'a str>,
    pub changed_by: &'a str,
}

impl TryFrom<ChangeHistoryEntry> for DomainChangeHistoryEntry {
    type Error = TypeConstraintError;

    fn try_from(row: ChangeHistoryEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HistoryEntryId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            field: row.field,
            old_value: row.old_value,
            new_value: row.new_value,
            changed_by: UserEmail::new(row.changed_by)?,
            changed_at: row.changed_at,
        })
    }
}

impl<'a> From<&'a DomainNewChangeHistoryEntry> for NewChangeHistoryEntry<'a> {
    fn from(entry: &'a DomainNewChangeHistoryEntry) -> Self {
        Self {
            client_id: entry.client_id.get(),
            field: entry.field.as_str(),
            old_value: entry.old_value.as_deref(),
            new_value: entry.new_value.as_deref(),
            changed_by: entry.changed_by.as_str(),
        }
    }
}
