//! Access to the client store.
//!
//! Services only see the reader/writer traits below. [`DieselRepository`]
//! implements all of them over a pooled SQLite database; the `test-mocks`
//! feature adds a `mockall` double.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::domain::client::{Client, ClientDetails};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::document::{Document, NewDocument};
use crate::domain::history::{ChangeHistoryEntry, NewChangeHistoryEntry};
use crate::domain::installment::{Installment, NewInstallment};
use crate::domain::types::{ClientId, CommentId, DocumentId, InstallmentId, UserEmail};
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;

pub mod audit;
pub mod client;
pub mod client_records;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Every client, ordered by id.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, details: &ClientDetails) -> RepositoryResult<Client>;
    fn update_client(&self, id: ClientId, details: &ClientDetails) -> RepositoryResult<Client>;
    /// Removes the client and its comments, installments, documents and history.
    fn delete_client(&self, id: ClientId) -> RepositoryResult<()>;
}

pub trait CommentReader {
    /// Newest first.
    fn list_comments(&self, client_id: ClientId) -> RepositoryResult<Vec<Comment>>;
}

pub trait CommentWriter {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<Comment>;
    fn delete_comment(&self, id: CommentId) -> RepositoryResult<()>;
}

pub trait InstallmentReader {
    fn list_installments(&self, client_id: ClientId) -> RepositoryResult<Vec<Installment>>;
}

pub trait InstallmentWriter {
    fn create_installment(&self, installment: &NewInstallment) -> RepositoryResult<Installment>;
    fn delete_installment(&self, id: InstallmentId) -> RepositoryResult<()>;
}

pub trait DocumentReader {
    /// Ordered by expiry date, documents without one last.
    fn list_documents(&self, client_id: ClientId) -> RepositoryResult<Vec<Document>>;
}

pub trait DocumentWriter {
    fn create_document(&self, document: &NewDocument) -> RepositoryResult<Document>;
    fn delete_document(&self, id: DocumentId) -> RepositoryResult<()>;
}

pub trait ChangeHistoryReader {
    /// Newest first.
    fn list_change_history(&self, client_id: ClientId)
    -> RepositoryResult<Vec<ChangeHistoryEntry>>;
}

pub trait ChangeHistoryWriter {
    fn create_change_history(&self, entries: &[NewChangeHistoryEntry]) -> RepositoryResult<usize>;
}

pub trait AuditLogReader {
    /// Newest first, at most `limit` entries.
    fn list_audit_entries(&self, limit: usize) -> RepositoryResult<Vec<AuditEntry>>;
}

pub trait AuditLogWriter {
    fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<AuditEntry>;
}

pub trait UserReader {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    /// Ordered by e-mail.
    fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    /// Inserts the user or replaces the stored row with the same e-mail.
    fn save_user(&self, user: &User) -> RepositoryResult<User>;
    fn delete_user(&self, email: &UserEmail) -> RepositoryResult<()>;
}
