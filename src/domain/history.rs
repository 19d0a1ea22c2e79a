use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::FieldChange;
use crate::domain::types::{ClientId, HistoryEntryId, UserEmail};

/// Record of one field changing on a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChangeHistoryEntry {
    pub id: HistoryEntryId,
    pub client_id: ClientId,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: UserEmail,
    pub changed_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewChangeHistoryEntry {
    pub client_id: ClientId,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: UserEmail,
}

impl NewChangeHistoryEntry {
    #[must_use]
    pub fn from_change(client_id: ClientId, change: FieldChange, changed_by: UserEmail) -> Self {
        Self {
            client_id,
            field: change.field.to_string(),
            old_value: change.old_value,
            new_value: change.new_value,
            changed_by,
        }
    }
}
