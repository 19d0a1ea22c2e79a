use chrono::NaiveDate;
use fiscal_crm::domain::audit::{AuditAction, NewAuditEntry};
use fiscal_crm::domain::client::{ClientDetails, Deadlines, Regularity};
use fiscal_crm::domain::comment::NewComment;
use fiscal_crm::domain::document::NewDocument;
use fiscal_crm::domain::installment::NewInstallment;
use fiscal_crm::domain::types::{
    Amount, CommentText, CompanyName, DocumentName, InstallmentDescription,
    InstallmentStatus, LegalName, Municipality, RegularityStatus, Situation, TaxId, Uf,
    UserEmail, UserName,
};
use fiscal_crm::domain::user::{Role, User};
use fiscal_crm::forms::client::ClientForm;
use fiscal_crm::repository::errors::RepositoryError;
use fiscal_crm::repository::{
    AuditLogReader, AuditLogWriter, ChangeHistoryReader, ClientReader, ClientWriter,
    CommentReader, CommentWriter, DieselRepository, DocumentReader, DocumentWriter,
    InstallmentReader, InstallmentWriter, UserReader, UserWriter,
};
use fiscal_crm::services::client as client_service;

mod common;

fn details(legal_name: &str, tax_id: &str) -> ClientDetails {
    ClientDetails {
        legal_name: LegalName::new(legal_name).unwrap(),
        tax_id: TaxId::new(tax_id).unwrap(),
        company: CompanyName::new("Matriz").unwrap(),
        squad: None,
        uf: Some(Uf::new("SP").unwrap()),
        municipality: Municipality::new("Campinas").unwrap(),
        situation: Situation::Active,
        tax_regime: None,
        revenue: Amount::new(1500.0).unwrap(),
        installment_status: None,
        regularity: Regularity::default(),
        entry_date: None,
        incorporation_date: None,
        last_fiscal_check: None,
        deadlines: Deadlines::default(),
        regularity_notes: None,
        notes: None,
    }
}

fn operator(email: &str, role: Role) -> User {
    User {
        email: UserEmail::new(email).unwrap(),
        name: UserName::new("Operador").unwrap(),
        company: CompanyName::new("Matriz").unwrap(),
        role,
        active: true,
    }
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let alfa = repo
        .create_client(&details("Alfa Ltda", "11.222.333/0001-81"))
        .unwrap();
    let beta = repo.create_client(&details("Beta ME", "111.444.777-35")).unwrap();

    assert_eq!(alfa.tax_id.as_str(), "11222333000181");
    assert_eq!(alfa.uf.as_ref().map(Uf::as_str), Some("SP"));

    let clients = repo.list_clients().unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].id, alfa.id);
    assert_eq!(clients[1].id, beta.id);

    let mut changed = beta.details();
    changed.situation = Situation::Inactive;
    changed.uf = None;
    changed.regularity.federal = Some(RegularityStatus::Pending);
    changed.deadlines.closing = NaiveDate::from_ymd_opt(2025, 12, 31);
    let updated = repo.update_client(beta.id, &changed).unwrap();

    assert_eq!(updated.situation, Situation::Inactive);
    assert_eq!(updated.uf, None);
    assert_eq!(updated.regularity.federal, Some(RegularityStatus::Pending));
    assert_eq!(updated.deadlines.closing, NaiveDate::from_ymd_opt(2025, 12, 31));

    repo.delete_client(alfa.id).unwrap();
    assert!(repo.get_client_by_id(alfa.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_client(alfa.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_duplicate_tax_id_is_reported_as_duplicate() {
    let test_db = common::TestDb::new("test_duplicate_tax_id.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_client(&details("Alfa Ltda", "11144477735")).unwrap();
    let result = repo.create_client(&details("Outra Alfa", "111.444.777-35"));

    assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
}

#[test]
fn test_client_records_and_cascade_delete() {
    let test_db = common::TestDb::new("test_client_records.db");
    let repo = DieselRepository::new(test_db.pool());
    let client = repo.create_client(&details("Gama SA", "11144477735")).unwrap();
    let author = UserEmail::new("ana@example.com").unwrap();

    let comment = repo
        .create_comment(&NewComment {
            client_id: client.id,
            author_email: author.clone(),
            text: CommentText::new("Enviar guia do ISS").unwrap(),
        })
        .unwrap();
    assert_eq!(comment.author_email, author);

    let installment = repo
        .create_installment(&NewInstallment {
            client_id: client.id,
            description: InstallmentDescription::new("PERT").unwrap(),
            total_amount: Amount::new(1200.0).unwrap(),
            installment_count: 12,
            first_due_date: NaiveDate::from_ymd_opt(2025, 2, 28),
            status: InstallmentStatus::Active,
        })
        .unwrap();
    assert_eq!(installment.installment_value(), 100.0);

    for (name, expires_on) in [
        ("Procuração", None),
        ("Alvará", NaiveDate::from_ymd_opt(2025, 8, 1)),
        ("Certificado digital", NaiveDate::from_ymd_opt(2025, 3, 1)),
    ] {
        repo.create_document(&NewDocument {
            client_id: client.id,
            name: DocumentName::new(name).unwrap(),
            expires_on,
        })
        .unwrap();
    }

    assert_eq!(repo.list_comments(client.id).unwrap().len(), 1);
    assert_eq!(repo.list_installments(client.id).unwrap().len(), 1);
    let names: Vec<String> = repo
        .list_documents(client.id)
        .unwrap()
        .into_iter()
        .map(|d| d.name.to_string())
        .collect();
    assert_eq!(names, vec!["Certificado digital", "Alvará", "Procuração"]);

    repo.delete_comment(comment.id).unwrap();
    assert!(repo.list_comments(client.id).unwrap().is_empty());
    assert!(matches!(
        repo.delete_installment(installment.id)
            .and_then(|_| repo.delete_installment(installment.id)),
        Err(RepositoryError::NotFound)
    ));

    repo.delete_client(client.id).unwrap();
    assert!(repo.list_documents(client.id).unwrap().is_empty());
}

#[test]
fn test_users_and_audit_log() {
    let test_db = common::TestDb::new("test_users_and_audit_log.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut bia = operator("bia@example.com", Role::Other("Analista".to_string()));
    repo.save_user(&operator("admin@example.com", Role::Administrator))
        .unwrap();
    repo.save_user(&bia).unwrap();

    bia.active = false;
    let saved = repo.save_user(&bia).unwrap();
    assert!(!saved.active);

    let users = repo.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users[0].is_admin());
    assert_eq!(users[1].role, Role::Other("Analista".to_string()));

    repo.delete_user(&bia.email).unwrap();
    assert!(repo.get_user_by_email(&bia.email).unwrap().is_none());

    let admin_email = UserEmail::new("admin@example.com").unwrap();
    for details in ["primeiro", "segundo", "terceiro"] {
        repo.create_audit_entry(&NewAuditEntry::new(
            admin_email.clone(),
            AuditAction::ExportCsv,
            None,
            details,
        ))
        .unwrap();
    }

    let entries = repo.list_audit_entries(2).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].details, "terceiro");
    assert_eq!(entries[0].action, AuditAction::ExportCsv);
}

#[test]
fn test_saving_through_service_records_history_and_audit() {
    let test_db = common::TestDb::new("test_service_history.db");
    let repo = DieselRepository::new(test_db.pool());
    let user = operator("ana@example.com", Role::Other("Analista".to_string()));

    let form = ClientForm {
        company: "Matriz".to_string(),
        legal_name: "Delta Serviços".to_string(),
        tax_id: "11.222.333/0001-81".to_string(),
        municipality: "Campinas".to_string(),
        revenue: "abc".to_string(),
        ..ClientForm::default()
    };
    let created = client_service::save_client(&repo, Some(&user), None, &form).unwrap();

    let stored = repo.get_client_by_id(created.client_id).unwrap().unwrap();
    assert_eq!(stored.revenue.get(), 0.0);
    assert_eq!(stored.situation, Situation::Active);

    let edited = ClientForm {
        uf: "RJ".to_string(),
        notes: "Migrar para Lucro Presumido".to_string(),
        ..ClientForm::from(&stored)
    };
    let outcome =
        client_service::save_client(&repo, Some(&user), Some(created.client_id.get()), &edited)
            .unwrap();
    assert_eq!(outcome.changed_fields, 2);

    let history = repo.list_change_history(created.client_id).unwrap();
    let mut fields: Vec<&str> = history.iter().map(|h| h.field.as_str()).collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["notes", "uf"]);
    assert!(history.iter().all(|h| h.changed_by == user.email));

    let actions: Vec<AuditAction> = repo
        .list_audit_entries(10)
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions.len(), 2);
    assert!(actions.contains(&AuditAction::ClientCreated));
    assert!(actions.contains(&AuditAction::ClientUpdated));
}
