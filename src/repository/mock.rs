//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::domain::client::{Client, ClientDetails};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::document::{Document, NewDocument};
use crate::domain::history::{ChangeHistoryEntry, NewChangeHistoryEntry};
use crate::domain::installment::{Installment, NewInstallment};
use crate::domain::types::{ClientId, CommentId, DocumentId, InstallmentId, UserEmail};
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuditLogReader, AuditLogWriter, ChangeHistoryReader, ChangeHistoryWriter, ClientReader,
    ClientWriter, CommentReader, CommentWriter, DocumentReader, DocumentWriter,
    InstallmentReader, InstallmentWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, details: &ClientDetails) -> RepositoryResult<Client>;
        fn update_client(&self, id: ClientId, details: &ClientDetails) -> RepositoryResult<Client>;
        fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
    }

    impl CommentReader for Repository {
        fn list_comments(&self, client_id: ClientId) -> RepositoryResult<Vec<Comment>>;
    }

    impl CommentWriter for Repository {
        fn create_comment(&self, comment: &NewComment) -> RepositoryResult<Comment>;
        fn delete_comment(&self, id: CommentId) -> RepositoryResult<()>;
    }

    impl InstallmentReader for Repository {
        fn list_installments(&self, client_id: ClientId) -> RepositoryResult<Vec<Installment>>;
    }

    impl InstallmentWriter for Repository {
        fn create_installment(&self, installment: &NewInstallment) -> RepositoryResult<Installment>;
        fn delete_installment(&self, id: InstallmentId) -> RepositoryResult<()>;
    }

    impl DocumentReader for Repository {
        fn list_documents(&self, client_id: ClientId) -> RepositoryResult<Vec<Document>>;
    }

    impl DocumentWriter for Repository {
        fn create_document(&self, document: &NewDocument) -> RepositoryResult<Document>;
        fn delete_document(&self, id: DocumentId) -> RepositoryResult<()>;
    }

    impl ChangeHistoryReader for Repository {
        fn list_change_history(
            &self,
            client_id: ClientId,
        ) -> RepositoryResult<Vec<ChangeHistoryEntry>>;
    }

    impl ChangeHistoryWriter for Repository {
        fn create_change_history(
            &self,
            entries: &[NewChangeHistoryEntry],
        ) -> RepositoryResult<usize>;
    }

    impl AuditLogReader for Repository {
        fn list_audit_entries(&self, limit: usize) -> RepositoryResult<Vec<AuditEntry>>;
    }

    impl AuditLogWriter for Repository {
        fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<AuditEntry>;
    }

    impl UserReader for Repository {
        fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
        fn list_users(&self) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn save_user(&self, user: &User) -> RepositoryResult<User>;
        fn delete_user(&self, email: &UserEmail) -> RepositoryResult<()>;
    }
}
