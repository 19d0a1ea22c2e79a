//! Client documents with an expiry date (certificates, licences, powers of attorney).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, DocumentId, DocumentName};

/// Days before expiry at which a document starts being flagged.
pub const DEFAULT_WARNING_DAYS: i64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub client_id: ClientId,
    pub name: DocumentName,
    pub expires_on: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    pub client_id: ClientId,
    pub name: DocumentName,
    pub expires_on: Option<NaiveDate>,
}

/// Validity of a document on a given day.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentValidity {
    Valid,
    /// Expires within the warning window (inclusive).
    ExpiringSoon { days_left: i64 },
    Expired,
    NoExpiry,
}

impl DocumentValidity {
    pub fn evaluate(expires_on: Option<NaiveDate>, today: NaiveDate, warning_days: i64) -> Self {
        let Some(expires_on) = expires_on else {
            return DocumentValidity::NoExpiry;
        };
        let days_left = (expires_on - today).num_days();
        if days_left < 0 {
            DocumentValidity::Expired
        } else if days_left <= warning_days {
            DocumentValidity::ExpiringSoon { days_left }
        } else {
            DocumentValidity::Valid
        }
    }
}

impl Document {
    pub fn validity(&self, today: NaiveDate, warning_days: i64) -> DocumentValidity {
        DocumentValidity::evaluate(self.expires_on, today, warning_days)
    }
}
