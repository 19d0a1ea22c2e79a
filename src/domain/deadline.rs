//! Upcoming fiscal deadlines across the client portfolio.

use std::fmt::Display;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::ClientId;

/// Days ahead scanned for upcoming deadlines.
pub const DEFAULT_DEADLINE_WINDOW_DAYS: u64 = 30;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeadlineKind {
    IssDue,
    EfdReinf,
    Closing,
}

impl DeadlineKind {
    pub const ALL: [DeadlineKind; 3] = [Self::IssDue, Self::EfdReinf, Self::Closing];

    pub fn date_for(self, client: &Client) -> Option<NaiveDate> {
        match self {
            Self::IssDue => client.deadlines.iss_due,
            Self::EfdReinf => client.deadlines.efd_reinf,
            Self::Closing => client.deadlines.closing,
        }
    }
}

impl Display for DeadlineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IssDue => write!(f, "Vencimento ISS"),
            Self::EfdReinf => write!(f, "Prazo EFD-Reinf"),
            Self::Closing => write!(f, "Prazo Fechamento"),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DeadlineNotice {
    pub client_id: ClientId,
    pub legal_name: String,
    pub kind: DeadlineKind,
    pub due_date: NaiveDate,
    pub days_left: i64,
}

/// `true` when `date` lies in `[today, today + window_days]`.
pub fn within_window(date: NaiveDate, today: NaiveDate, window_days: u64) -> bool {
    let end = today
        .checked_add_days(Days::new(window_days))
        .unwrap_or(NaiveDate::MAX);
    date >= today && date <= end
}

/// One notice per deadline falling inside the window, earliest first.
pub fn upcoming_deadlines(
    clients: &[Client],
    today: NaiveDate,
    window_days: u64,
) -> Vec<DeadlineNotice> {
    let mut notices: Vec<DeadlineNotice> = clients
        .iter()
        .flat_map(|client| {
            DeadlineKind::ALL.into_iter().filter_map(move |kind| {
                let due_date = kind.date_for(client)?;
                within_window(due_date, today, window_days).then(|| DeadlineNotice {
                    client_id: client.id,
                    legal_name: client.legal_name.to_string(),
                    kind,
                    due_date,
                    days_left: (due_date - today).num_days(),
                })
            })
        })
        .collect();

    notices.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then(a.client_id.cmp(&b.client_id))
            .then(a.kind.cmp(&b.kind))
    });
    notices
}
