//! Client detail view and client mutations with their audit trail.

use chrono::NaiveDate;

use crate::domain::audit::AuditAction;
use crate::domain::client::ClientDetails;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::document::{Document, NewDocument};
use crate::domain::history::NewChangeHistoryEntry;
use crate::domain::installment::{Installment, NewInstallment};
use crate::domain::types::{ClientId, CommentId, DocumentId, InstallmentId};
use crate::domain::user::User;
use crate::dto::client::{ClientOperationOutcome, ClientPageData};
use crate::forms::client::{AddCommentForm, AddDocumentForm, AddInstallmentForm, ClientForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    AuditLogWriter, ChangeHistoryReader, ChangeHistoryWriter, ClientReader, ClientWriter,
    CommentReader, CommentWriter, DocumentReader, DocumentWriter, InstallmentReader,
    InstallmentWriter,
};
use crate::services::{ServiceError, ServiceResult, audit, ensure_user};

fn duplicate_tax_id(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Duplicate(_) => ServiceError::Form("CPF/CNPJ já cadastrado".to_string()),
        other => other.into(),
    }
}

/// Loads a client with its comments, installment plans, documents and history.
pub fn load_client_page<R>(
    repo: &R,
    user: Option<&User>,
    client_id: i32,
    today: NaiveDate,
    warning_days: i64,
) -> ServiceResult<ClientPageData>
where
    R: ClientReader
        + CommentReader
        + InstallmentReader
        + DocumentReader
        + ChangeHistoryReader
        + ?Sized,
{
    ensure_user(user)?;
    let client_id = ClientId::new(client_id)?;

    let client = repo
        .get_client_by_id(client_id)
        .map_err(|err| {
            log::error!("Failed to load client {client_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let comments = repo.list_comments(client_id)?;
    let installments = repo.list_installments(client_id)?;
    let documents = repo
        .list_documents(client_id)?
        .into_iter()
        .map(|document| {
            let validity = document.validity(today, warning_days);
            (document, validity)
        })
        .collect();
    let history = repo.list_change_history(client_id)?;

    Ok(ClientPageData {
        form: ClientForm::from(&client),
        client,
        comments,
        installments,
        documents,
        history,
    })
}

/// Creates a client, or updates `client_id` recording one history entry per
/// changed field.
pub fn save_client<R>(
    repo: &R,
    user: Option<&User>,
    client_id: Option<i32>,
    form: &ClientForm,
) -> ServiceResult<ClientOperationOutcome>
where
    R: ClientReader + ClientWriter + ChangeHistoryWriter + AuditLogWriter + ?Sized,
{
    let user = ensure_user(user)?;

    let details = ClientDetails::try_from(form).map_err(|err| {
        log::error!("Failed to validate client form: {err}");
        err
    })?;

    let Some(client_id) = client_id else {
        let client = repo.create_client(&details).map_err(|err| {
            log::error!("Failed to create client: {err}");
            duplicate_tax_id(err)
        })?;
        log::info!("Client {} created by {}", client.id, user.email);

        audit::record(
            repo,
            Some(user),
            AuditAction::ClientCreated,
            Some(client.id),
            client.legal_name.as_str(),
        );
        return Ok(ClientOperationOutcome {
            client_id: client.id,
            changed_fields: 0,
        });
    };

    let client_id = ClientId::new(client_id)?;
    let existing = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    let changes = existing.details().diff(&details);
    let client = repo.update_client(client_id, &details).map_err(|err| {
        log::error!("Failed to update client {client_id}: {err}");
        duplicate_tax_id(err)
    })?;

    let entries: Vec<NewChangeHistoryEntry> = changes
        .into_iter()
        .map(|change| NewChangeHistoryEntry::from_change(client_id, change, user.email.clone()))
        .collect();
    if let Err(err) = repo.create_change_history(&entries) {
        log::error!("Failed to record change history for client {client_id}: {err}");
    }

    let fields: Vec<&str> = entries.iter().map(|entry| entry.field.as_str()).collect();
    audit::record(
        repo,
        Some(user),
        AuditAction::ClientUpdated,
        Some(client_id),
        &format!("{}: {}", client.legal_name, fields.join(", ")),
    );

    Ok(ClientOperationOutcome {
        client_id,
        changed_fields: entries.len(),
    })
}

/// Deletes a client together with its dependent records.
pub fn delete_client<R>(repo: &R, user: Option<&User>, client_id: i32) -> ServiceResult<()>
where
    R: ClientReader + ClientWriter + AuditLogWriter + ?Sized,
{
    let user = ensure_user(user)?;
    let client_id = ClientId::new(client_id)?;

    let client = repo
        .get_client_by_id(client_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_client(client_id).map_err(|err| {
        log::error!("Failed to delete client {client_id}: {err}");
        err
    })?;
    log::info!("Client {client_id} deleted by {}", user.email);

    audit::record(
        repo,
        Some(user),
        AuditAction::ClientDeleted,
        Some(client_id),
        client.legal_name.as_str(),
    );
    Ok(())
}

pub fn add_comment<R>(repo: &R, user: Option<&User>, form: AddCommentForm) -> ServiceResult<Comment>
where
    R: CommentWriter + ?Sized,
{
    let user = ensure_user(user)?;
    let comment: NewComment = form.into_new_comment(&user.email)?;

    let comment = repo.create_comment(&comment).map_err(|err| {
        log::error!("Failed to add comment: {err}");
        err
    })?;
    Ok(comment)
}

pub fn delete_comment<R>(repo: &R, user: Option<&User>, comment_id: i32) -> ServiceResult<()>
where
    R: CommentWriter + ?Sized,
{
    ensure_user(user)?;
    repo.delete_comment(CommentId::new(comment_id)?)?;
    Ok(())
}

pub fn add_installment<R>(
    repo: &R,
    user: Option<&User>,
    form: AddInstallmentForm,
) -> ServiceResult<Installment>
where
    R: InstallmentWriter + ?Sized,
{
    ensure_user(user)?;
    let installment = NewInstallment::try_from(form)?;

    let installment = repo.create_installment(&installment).map_err(|err| {
        log::error!("Failed to add installment plan: {err}");
        err
    })?;
    Ok(installment)
}

pub fn delete_installment<R>(
    repo: &R,
    user: Option<&User>,
    installment_id: i32,
) -> ServiceResult<()>
where
    R: InstallmentWriter + ?Sized,
{
    ensure_user(user)?;
    repo.delete_installment(InstallmentId::new(installment_id)?)?;
    Ok(())
}

pub fn add_document<R>(
    repo: &R,
    user: Option<&User>,
    form: AddDocumentForm,
) -> ServiceResult<Document>
where
    R: DocumentWriter + ?Sized,
{
    ensure_user(user)?;
    let document = NewDocument::try_from(form)?;

    let document = repo.create_document(&document).map_err(|err| {
        log::error!("Failed to add document: {err}");
        err
    })?;
    Ok(document)
}

pub fn delete_document<R>(repo: &R, user: Option<&User>, document_id: i32) -> ServiceResult<()>
where
    R: DocumentWriter + ?Sized,
{
    ensure_user(user)?;
    repo.delete_document(DocumentId::new(document_id)?)?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::audit::AuditEntry;
    use crate::domain::client::fixtures::client;
    use crate::domain::document::DocumentValidity;
    use crate::domain::types::{AuditEntryId, DocumentName, LegalName};
    use crate::repository::mock::MockRepository;
    use crate::services::fixtures::analyst;

    fn epoch() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn expect_audit(repo: &mut MockRepository, action: AuditAction) {
        repo.expect_create_audit_entry()
            .withf(move |e| e.action == action)
            .times(1)
            .returning(|e| {
                Ok(AuditEntry {
                    id: AuditEntryId::new(1).unwrap(),
                    user_email: e.user_email.clone(),
                    action: e.action.clone(),
                    client_id: e.client_id,
                    details: e.details.clone(),
                    created_at: epoch(),
                })
            });
    }

    fn form(legal_name: &str) -> ClientForm {
        ClientForm {
            company: "Matriz".to_string(),
            legal_name: legal_name.to_string(),
            tax_id: "111.444.777-35".to_string(),
            municipality: "São Paulo".to_string(),
            ..ClientForm::default()
        }
    }

    #[test]
    fn save_requires_a_user() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(0);

        let result = save_client(&repo, None, None, &form("Alfa Ltda"));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn invalid_form_is_not_persisted() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(0);
        let user = analyst();

        let mut invalid = form("Alfa Ltda");
        invalid.tax_id = "123.456.789-00".to_string();
        let result = save_client(&repo, Some(&user), None, &invalid);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_is_audited() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .withf(|details| details.tax_id.as_str() == "11144477735")
            .times(1)
            .returning(|details| {
                let mut created = client(9, details.legal_name.as_str());
                created.tax_id = details.tax_id.clone();
                Ok(created)
            });
        repo.expect_create_change_history().times(0);
        expect_audit(&mut repo, AuditAction::ClientCreated);
        let user = analyst();

        let outcome = save_client(&repo, Some(&user), None, &form("Alfa Ltda")).unwrap();

        assert_eq!(outcome.client_id.get(), 9);
        assert_eq!(outcome.changed_fields, 0);
    }

    #[test]
    fn duplicate_tax_id_becomes_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_create_client()
            .times(1)
            .returning(|_| Err(RepositoryError::Duplicate("clients.tax_id".to_string())));
        repo.expect_create_audit_entry().times(0);
        let user = analyst();

        let result = save_client(&repo, Some(&user), None, &form("Alfa Ltda"));

        assert!(matches!(result, Err(ServiceError::Form(msg)) if msg.contains("CPF/CNPJ")));
    }

    #[test]
    fn other_constraint_failures_are_not_reported_as_duplicates() {
        let mut repo = MockRepository::new();
        repo.expect_create_client().times(1).returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "Check constraint violation: clients.revenue".to_string(),
            ))
        });
        repo.expect_create_audit_entry().times(0);
        let user = analyst();

        let result = save_client(&repo, Some(&user), None, &form("Alfa Ltda"));

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::ConstraintViolation(_)))
        ));
    }

    #[test]
    fn update_records_changed_fields() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .withf(|id| id.get() == 3)
            .times(1)
            .returning(|_| Ok(Some(client(3, "Alfa Ltda"))));
        repo.expect_update_client()
            .times(1)
            .returning(|id, details| {
                let mut updated = client(id.get(), "x");
                updated.legal_name = details.legal_name.clone();
                updated.notes = details.notes.clone();
                Ok(updated)
            });
        repo.expect_create_change_history()
            .withf(|entries| {
                entries.len() == 2
                    && entries[0].field == "legal_name"
                    && entries[0].old_value.as_deref() == Some("Alfa Ltda")
                    && entries[1].field == "notes"
                    && entries[1].changed_by.as_str() == "ana@example.com"
            })
            .times(1)
            .returning(|entries| Ok(entries.len()));
        expect_audit(&mut repo, AuditAction::ClientUpdated);
        let user = analyst();

        let mut changed = form("Alfa Comércio Ltda");
        changed.notes = "Cliente prioritário".to_string();
        let outcome = save_client(&repo, Some(&user), Some(3), &changed).unwrap();

        assert_eq!(outcome.client_id.get(), 3);
        assert_eq!(outcome.changed_fields, 2);
    }

    #[test]
    fn update_of_missing_client_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id().times(1).returning(|_| Ok(None));
        repo.expect_update_client().times(0);
        let user = analyst();

        let result = save_client(&repo, Some(&user), Some(44), &form("Alfa Ltda"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn delete_is_audited_with_the_legal_name() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .times(1)
            .returning(|id| Ok(Some(client(id.get(), "Beta ME"))));
        repo.expect_delete_client()
            .withf(|id| id.get() == 5)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_create_audit_entry()
            .withf(|e| e.action == AuditAction::ClientDeleted && e.details == "Beta ME")
            .times(1)
            .returning(|e| {
                Ok(AuditEntry {
                    id: AuditEntryId::new(2).unwrap(),
                    user_email: e.user_email.clone(),
                    action: e.action.clone(),
                    client_id: e.client_id,
                    details: e.details.clone(),
                    created_at: epoch(),
                })
            });
        let user = analyst();

        assert!(delete_client(&repo, Some(&user), 5).is_ok());
    }

    #[test]
    fn client_page_evaluates_document_validity() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_id()
            .times(1)
            .returning(|id| Ok(Some(client(id.get(), "Gama SA"))));
        repo.expect_list_comments().times(1).returning(|_| Ok(Vec::new()));
        repo.expect_list_installments()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_list_documents().times(1).returning(|client_id| {
            Ok(vec![Document {
                id: DocumentId::new(1).unwrap(),
                client_id,
                name: DocumentName::new("Alvará").unwrap(),
                expires_on: NaiveDate::from_ymd_opt(2025, 3, 10),
                created_at: epoch(),
            }])
        });
        repo.expect_list_change_history()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let user = analyst();

        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let page = load_client_page(&repo, Some(&user), 7, today, 30).unwrap();

        assert_eq!(page.client.legal_name, LegalName::new("Gama SA").unwrap());
        assert_eq!(page.form.legal_name, "Gama SA");
        assert_eq!(
            page.documents[0].1,
            DocumentValidity::ExpiringSoon { days_left: 9 }
        );
    }

    #[test]
    fn client_page_rejects_bad_id() {
        let repo = MockRepository::new();
        let user = analyst();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        assert!(matches!(
            load_client_page(&repo, Some(&user), 0, today, 30),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn comment_is_authored_by_current_user() {
        let mut repo = MockRepository::new();
        repo.expect_create_comment()
            .withf(|c| c.author_email.as_str() == "ana@example.com" && c.text.as_str() == "Ligar")
            .times(1)
            .returning(|c| {
                Ok(Comment {
                    id: CommentId::new(1).unwrap(),
                    client_id: c.client_id,
                    author_email: c.author_email.clone(),
                    text: c.text.clone(),
                    created_at: epoch(),
                })
            });
        let user = analyst();

        let form = AddCommentForm {
            client_id: 2,
            text: "Ligar".to_string(),
        };
        let comment = add_comment(&repo, Some(&user), form).unwrap();

        assert_eq!(comment.client_id.get(), 2);
    }

    #[test]
    fn deleting_missing_document_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_document()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));
        let user = analyst();

        assert!(matches!(
            delete_document(&repo, Some(&user), 8),
            Err(ServiceError::NotFound)
        ));
    }
}
