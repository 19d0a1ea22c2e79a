use chrono::Utc;
use diesel::prelude::*;

use crate::domain::client::{Client, ClientDetails};
use crate::domain::types::ClientId;
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .select(DbClient::as_select())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let rows = clients::table
            .order(clients::id.asc())
            .select(DbClient::as_select())
            .load::<DbClient>(&mut conn)?;

        rows.into_iter()
            .map(|row| Client::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, details: &ClientDetails) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(clients::table)
            .values(DbNewClient::from(details))
            .returning(DbClient::as_returning())
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(row)?)
    }

    fn update_client(&self, id: ClientId, details: &ClientDetails) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changes = DbUpdateClient::new(details, Utc::now().naive_utc());
        let row = diesel::update(clients::table.find(id.get()))
            .set(&changes)
            .returning(DbClient::as_returning())
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(row)?)
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        use crate::schema::{change_history, clients, comments, documents, installments};

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let client_id = id.get();
            diesel::delete(comments::table.filter(comments::client_id.eq(client_id)))
                .execute(conn)?;
            diesel::delete(installments::table.filter(installments::client_id.eq(client_id)))
                .execute(conn)?;
            diesel::delete(documents::table.filter(documents::client_id.eq(client_id)))
                .execute(conn)?;
            diesel::delete(change_history::table.filter(change_history::client_id.eq(client_id)))
                .execute(conn)?;

            let deleted = diesel::delete(clients::table.find(client_id)).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
