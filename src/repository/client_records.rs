//! Comments, installment plans, documents and change history attached to a client.

use diesel::prelude::*;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::document::{Document, NewDocument};
use crate::domain::history::{ChangeHistoryEntry, NewChangeHistoryEntry};
use crate::domain::installment::{Installment, NewInstallment};
use crate::domain::types::{ClientId, CommentId, DocumentId, InstallmentId};
use crate::models::comment::{Comment as DbComment, NewComment as DbNewComment};
use crate::models::document::{Document as DbDocument, NewDocument as DbNewDocument};
use crate::models::history::{
    ChangeHistoryEntry as DbChangeHistoryEntry, NewChangeHistoryEntry as DbNewChangeHistoryEntry,
};
use crate::models::installment::{
    Installment as DbInstallment, NewInstallment as DbNewInstallment,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ChangeHistoryReader, ChangeHistoryWriter, CommentReader, CommentWriter, DieselRepository,
    DocumentReader, DocumentWriter, InstallmentReader, InstallmentWriter,
};

/// Converts loaded rows, failing on the first one that breaks a domain rule.
fn into_domain<Row, T>(rows: Vec<Row>) -> RepositoryResult<Vec<T>>
where
    T: TryFrom<Row>,
    RepositoryError: From<T::Error>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn expect_deleted(affected: usize) -> RepositoryResult<()> {
    if affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

impl CommentReader for DieselRepository {
    fn list_comments(&self, client_id: ClientId) -> RepositoryResult<Vec<Comment>> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let rows = comments::table
            .filter(comments::client_id.eq(client_id.get()))
            .order((comments::created_at.desc(), comments::id.desc()))
            .select(DbComment::as_select())
            .load::<DbComment>(&mut conn)?;

        into_domain(rows)
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<Comment> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(comments::table)
            .values(DbNewComment::from(comment))
            .returning(DbComment::as_returning())
            .get_result::<DbComment>(&mut conn)?;

        Ok(Comment::try_from(row)?)
    }

    fn delete_comment(&self, id: CommentId) -> RepositoryResult<()> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        expect_deleted(diesel::delete(comments::table.find(id.get())).execute(&mut conn)?)
    }
}

impl InstallmentReader for DieselRepository {
    fn list_installments(&self, client_id: ClientId) -> RepositoryResult<Vec<Installment>> {
        use crate::schema::installments;

        let mut conn = self.conn()?;
        let rows = installments::table
            .filter(installments::client_id.eq(client_id.get()))
            .order((installments::created_at.desc(), installments::id.desc()))
            .select(DbInstallment::as_select())
            .load::<DbInstallment>(&mut conn)?;

        into_domain(rows)
    }
}

impl InstallmentWriter for DieselRepository {
    fn create_installment(&self, installment: &NewInstallment) -> RepositoryResult<Installment> {
        use crate::schema::installments;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(installments::table)
            .values(DbNewInstallment::try_from(installment)?)
            .returning(DbInstallment::as_returning())
            .get_result::<DbInstallment>(&mut conn)?;

        Ok(Installment::try_from(row)?)
    }

    fn delete_installment(&self, id: InstallmentId) -> RepositoryResult<()> {
        use crate::schema::installments;

        let mut conn = self.conn()?;
        expect_deleted(diesel::delete(installments::table.find(id.get())).execute(&mut conn)?)
    }
}

impl DocumentReader for DieselRepository {
    fn list_documents(&self, client_id: ClientId) -> RepositoryResult<Vec<Document>> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        let rows = documents::table
            .filter(documents::client_id.eq(client_id.get()))
            .order(documents::id.asc())
            .select(DbDocument::as_select())
            .load::<DbDocument>(&mut conn)?;

        let mut documents: Vec<Document> = into_domain(rows)?;
        documents.sort_by_key(|document| (document.expires_on.is_none(), document.expires_on));
        Ok(documents)
    }
}

impl DocumentWriter for DieselRepository {
    fn create_document(&self, document: &NewDocument) -> RepositoryResult<Document> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(documents::table)
            .values(DbNewDocument::from(document))
            .returning(DbDocument::as_returning())
            .get_result::<DbDocument>(&mut conn)?;

        Ok(Document::try_from(row)?)
    }

    fn delete_document(&self, id: DocumentId) -> RepositoryResult<()> {
        use crate::schema::documents;

        let mut conn = self.conn()?;
        expect_deleted(diesel::delete(documents::table.find(id.get())).execute(&mut conn)?)
    }
}

impl ChangeHistoryReader for DieselRepository {
    fn list_change_history(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<ChangeHistoryEntry>> {
        use crate::schema::change_history;

        let mut conn = self.conn()?;
        let rows = change_history::table
            .filter(change_history::client_id.eq(client_id.get()))
            .order((change_history::changed_at.desc(), change_history::id.desc()))
            .select(DbChangeHistoryEntry::as_select())
            .load::<DbChangeHistoryEntry>(&mut conn)?;

        into_domain(rows)
    }
}

impl ChangeHistoryWriter for DieselRepository {
    fn create_change_history(&self, entries: &[NewChangeHistoryEntry]) -> RepositoryResult<usize> {
        use crate::schema::change_history;

        if entries.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<DbNewChangeHistoryEntry> = entries.iter().map(Into::into).collect();
        let affected = diesel::insert_into(change_history::table)
            .values(&rows)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
