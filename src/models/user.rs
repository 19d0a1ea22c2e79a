use diesel::prelude::*;

use crate::domain::types::{CompanyName, TypeConstraintError, UserEmail, UserName};
use crate::domain::user::User as DomainUser;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(primary_key(email))]
pub struct User {
    pub email: String,
    pub name: String,
    pub company: String,
    pub role: String,
    pub active: bool,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(row: User) -> Result<Self, Self::Error> {
        Ok(Self {
            email: UserEmail::new(row.email)?,
            name: UserName::new(row.name)?,
            company: CompanyName::new(row.company)?,
            role: row.role.into(),
            active: row.active,
        })
    }
}

impl From<&DomainUser> for User {
    fn from(user: &DomainUser) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            company: user.company.as_str().to_string(),
            role: user.role.as_str().to_string(),
            active: user.active,
        }
    }
}
