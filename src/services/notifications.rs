//! Deadline notifications for the whole portfolio.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::deadline::{DeadlineNotice, upcoming_deadlines};
use crate::domain::document::{Document, DocumentValidity};
use crate::domain::types::ClientId;
use crate::repository::{ClientReader, DocumentReader};
use crate::services::ServiceResult;
use crate::services::main::load_clients;

/// Deadlines falling within `window_days` from `today`, earliest first.
pub fn deadline_notices<R>(
    repo: &R,
    today: NaiveDate,
    window_days: u64,
) -> ServiceResult<Vec<DeadlineNotice>>
where
    R: ClientReader + ?Sized,
{
    let clients = load_clients(repo)?;
    let notices = upcoming_deadlines(&clients, today, window_days);

    for notice in &notices {
        log::debug!(
            "{} for client {} due {} ({} days)",
            notice.kind,
            notice.client_id,
            notice.due_date,
            notice.days_left
        );
    }

    Ok(notices)
}

/// A document that has expired or expires within the warning window.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DocumentNotice {
    pub client_id: ClientId,
    pub legal_name: String,
    pub document: Document,
    pub validity: DocumentValidity,
}

/// Expired and soon-to-expire documents across all clients, in client order.
pub fn expiring_documents<R>(
    repo: &R,
    today: NaiveDate,
    warning_days: i64,
) -> ServiceResult<Vec<DocumentNotice>>
where
    R: ClientReader + DocumentReader + ?Sized,
{
    let mut notices = Vec::new();

    for client in load_clients(repo)? {
        let documents = repo.list_documents(client.id).map_err(|err| {
            log::error!("Failed to list documents for client {}: {err}", client.id);
            err
        })?;

        for document in documents {
            let validity = document.validity(today, warning_days);
            if matches!(
                validity,
                DocumentValidity::Expired | DocumentValidity::ExpiringSoon { .. }
            ) {
                notices.push(DocumentNotice {
                    client_id: client.id,
                    legal_name: client.legal_name.to_string(),
                    document,
                    validity,
                });
            }
        }
    }

    Ok(notices)
}
