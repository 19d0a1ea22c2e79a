use diesel::prelude::*;

use crate::domain::types::UserEmail;
use crate::domain::user::User;
use crate::models::user::User as DbUser;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .find(email.as_str())
            .select(DbUser::as_select())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(User::try_from).transpose()?)
    }

    fn list_users(&self) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let rows = users::table
            .order(users::email.asc())
            .select(DbUser::as_select())
            .load::<DbUser>(&mut conn)?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl UserWriter for DieselRepository {
    fn save_user(&self, user: &User) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let row = DbUser::from(user);
        let saved = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_update()
            .set(&row)
            .returning(DbUser::as_returning())
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(saved)?)
    }

    fn delete_user(&self, email: &UserEmail) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(users::table.find(email.as_str())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
