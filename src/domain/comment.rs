use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, CommentId, CommentText, UserEmail};

/// Free-text note left on a client by an operator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub client_id: ClientId,
    pub author_email: UserEmail,
    pub text: CommentText,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewComment {
    pub client_id: ClientId,
    pub author_email: UserEmail,
    pub text: CommentText,
}
