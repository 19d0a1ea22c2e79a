use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{Comment as DomainComment, NewComment as DomainNewComment};
use crate::domain::types::{ClientId, CommentId, CommentText, TypeConstraintError, UserEmail};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
pub struct Comment {
    pub id: i32,
    pub client_id: i32,
    pub author_email: String,
    pub text: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub client_id: i32,
    pub author_email: &'a str,
    pub text: &'a str,
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(row: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CommentId::new(row.id)?,
            client_id: ClientId::new(row.client_id)?,
            author_email: UserEmail::new(row.author_email)?,
            text: CommentText::new(row.text)?,
            created_at: row.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(comment: &'a DomainNewComment) -> Self {
        Self {
            client_id: comment.client_id.get(),
            author_email: comment.author_email.as_str(),
            text: comment.text.as_str(),
        }
    }
}
