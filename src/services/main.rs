use chrono::NaiveDate;

use crate::domain::client::Client;
use crate::domain::deadline::upcoming_deadlines;
use crate::dto::main::{DashboardData, DashboardStats};
use crate::repository::ClientReader;
use crate::services::ServiceResult;

/// Fetches the full client list that feeds the application state.
pub fn load_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to load clients: {err}");
        err
    })?;

    log::info!("Loaded {} clients", clients.len());
    Ok(clients)
}

/// Loads the clients and computes the dashboard counters and deadline list.
pub fn load_dashboard<R>(
    repo: &R,
    today: NaiveDate,
    window_days: u64,
) -> ServiceResult<DashboardData>
where
    R: ClientReader + ?Sized,
{
    let clients = load_clients(repo)?;

    Ok(DashboardData {
        stats: DashboardStats::compute(&clients, today, window_days),
        deadlines: upcoming_deadlines(&clients, today, window_days),
    })
}
