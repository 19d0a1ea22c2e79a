use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::document::{Document as DomainDocument, NewDocument as DomainNewDocument};
use crate::domain::types::{ClientId, DocumentId, DocumentName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::documents)]
pub struct Document {
    pub id: i32,
    pub client_id: i32,
    pub name: String,
    pub expires_on: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::documents)]
pub struct NewDocument<'a> {
    pub client_id: i32,
    pub name: &'a str,
    pub expires_on: Option<NaiveDate>,
}

impl TryFrom<Document> for DomainDocument {
    type Error = TypeConstraintError;

    fn try_from(row: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DocumentId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            name: DocumentName::new(row.name)?,
            expires_on: row.expires_on,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewDocument> for NewDocument<'a> {
    fn from(document: &'a DomainNewDocument) -> Self {
        Self {
            client_id: document.client_id.get(),
            name: document.name.as_str(),
            expires_on: document.expires_on,
        }
    }
}
