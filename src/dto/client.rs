//! DTOs shaped for the client detail view and edit modal.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::comment::Comment;
use crate::domain::document::{Document, DocumentValidity};
use crate::domain::history::ChangeHistoryEntry;
use crate::domain::installment::Installment;
use crate::domain::types::ClientId;
use crate::forms::client::ClientForm;

/// Aggregated data required to render the client details page.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    pub client: Client,
    /// Pre-filled values for the edit modal.
    pub form: ClientForm,
    pub comments: Vec<Comment>,
    pub installments: Vec<Installment>,
    pub documents: Vec<(Document, DocumentValidity)>,
    pub history: Vec<ChangeHistoryEntry>,
}

/// Result of a client mutation so callers can refresh the right record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOperationOutcome {
    pub client_id: ClientId,
    /// Number of fields recorded in the change history.
    pub changed_fields: usize,
}
