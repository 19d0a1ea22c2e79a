use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::deadline::{DeadlineKind, DeadlineNotice, within_window};
use crate::domain::types::Situation;

/// Portfolio counters shown on top of the dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    /// Deadlines (ISS, EFD-Reinf, closing) falling inside the window.
    pub upcoming_deadlines: usize,
    /// Clients with at least one pending or irregular scope.
    pub pending_regularity: usize,
    pub by_company: BTreeMap<String, usize>,
    /// Clients without a tax regime are not counted.
    pub by_tax_regime: BTreeMap<String, usize>,
}

impl DashboardStats {
    pub fn compute(clients: &[Client], today: NaiveDate, window_days: u64) -> Self {
        let mut stats = Self {
            total: clients.len(),
            ..Self::default()
        };

        for client in clients {
            if client.situation == Situation::Active {
                stats.active += 1;
            }
            if client.regularity.needs_attention() {
                stats.pending_regularity += 1;
            }
            stats.upcoming_deadlines += DeadlineKind::ALL
                .into_iter()
                .filter_map(|kind| kind.date_for(client))
                .filter(|date| within_window(*date, today, window_days))
                .count();

            *stats
                .by_company
                .entry(client.company.to_string())
                .or_default() += 1;
            if let Some(regime) = &client.tax_regime {
                *stats.by_tax_regime.entry(regime.to_string()).or_default() += 1;
            }
        }

        stats
    }
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    /// Upcoming deadlines, earliest first.
    pub deadlines: Vec<DeadlineNotice>,
}
