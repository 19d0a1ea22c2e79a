//! Filter, sort and paginate the in-memory client list.
//!
//! [`process`] is total: any record list and any parameter set produce a
//! page, possibly empty. Missing field values compare as the empty string.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::types::{Situation, Uf};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Columns the client table can be sorted by.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    Id,
    LegalName,
    TaxId,
    Company,
    Squad,
    Uf,
    Municipality,
    Situation,
    TaxRegime,
    Revenue,
    EntryDate,
    IncorporationDate,
    LastFiscalCheck,
    IssDueDate,
    EfdReinfDeadline,
    ClosingDeadline,
}

enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn text(value: Option<impl ToString>) -> Self {
        SortKey::Text(value.map(|v| v.to_string()).unwrap_or_default().to_lowercase())
    }

    fn into_text(self) -> String {
        match self {
            SortKey::Number(n) => n.to_string(),
            SortKey::Text(s) => s,
        }
    }
}

impl SortField {
    fn key(self, client: &Client) -> SortKey {
        match self {
            SortField::Id => SortKey::Number(f64::from(client.id.get())),
            SortField::Revenue => SortKey::Number(client.revenue.get()),
            SortField::LegalName => SortKey::text(Some(&client.legal_name)),
            SortField::TaxId => SortKey::text(Some(client.tax_id.as_str())),
            SortField::Company => SortKey::text(Some(&client.company)),
            SortField::Squad => SortKey::text(client.squad.as_ref()),
            SortField::Uf => SortKey::text(client.uf.as_ref()),
            SortField::Municipality => SortKey::text(Some(&client.municipality)),
            SortField::Situation => SortKey::text(Some(client.situation)),
            SortField::TaxRegime => SortKey::text(client.tax_regime.as_ref()),
            SortField::EntryDate => SortKey::text(client.entry_date),
            SortField::IncorporationDate => SortKey::text(client.incorporation_date),
            SortField::LastFiscalCheck => SortKey::text(client.last_fiscal_check),
            SortField::IssDueDate => SortKey::text(client.deadlines.iss_due),
            SortField::EfdReinfDeadline => SortKey::text(client.deadlines.efd_reinf),
            SortField::ClosingDeadline => SortKey::text(client.deadlines.closing),
        }
    }
}

fn compare_keys(a: SortKey, b: SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(&b),
        (a, b) => a.into_text().cmp(&b.into_text()),
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn compare(&self, a: &Client, b: &Client) -> Ordering {
        let ordering = compare_keys(self.field.key(a), self.field.key(b));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Equality filters; `None` (or an empty string) leaves the column unconstrained.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientFilters {
    pub company: Option<String>,
    pub situation: Option<Situation>,
    pub tax_regime: Option<String>,
    pub uf: Option<Uf>,
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|value| !value.is_empty())
}

impl ClientFilters {
    pub fn is_empty(&self) -> bool {
        active(&self.company).is_none()
            && self.situation.is_none()
            && active(&self.tax_regime).is_none()
            && self.uf.is_none()
    }

    pub fn matches(&self, client: &Client) -> bool {
        active(&self.company).is_none_or(|company| client.company.as_str() == company)
            && self.situation.is_none_or(|situation| client.situation == situation)
            && active(&self.tax_regime)
                .is_none_or(|regime| client.tax_regime.as_deref() == Some(regime))
            && self.uf.as_ref().is_none_or(|uf| client.uf.as_ref() == Some(uf))
    }
}

/// Case-insensitive substring match on legal name or tax id.
///
/// `needle` must already be lower-cased. The tax id matches in both its bare
/// and punctuated forms.
fn matches_search(client: &Client, needle: &str) -> bool {
    client.legal_name.to_lowercase().contains(needle)
        || client.tax_id.as_str().contains(needle)
        || client.tax_id.formatted().contains(needle)
}

/// Everything that decides which rows are visible.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListParams {
    pub search: String,
    pub filters: ClientFilters,
    pub sort: SortOrder,
    /// Requested 1-based page; clamped by [`process`].
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: ClientFilters::default(),
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Filters, sorts and slices `records` according to `params`.
///
/// The requested page is clamped into `1..=total_pages`; with no matches the
/// result has `total_pages == 0`, `page == 1` and no items.
pub fn process(records: &[Client], params: &ListParams) -> Paginated<Client> {
    let needle = params.search.trim().to_lowercase();

    let mut filtered: Vec<&Client> = records
        .iter()
        .filter(|client| needle.is_empty() || matches_search(client, &needle))
        .filter(|client| params.filters.matches(client))
        .collect();

    // `sort_by` is stable, so equal keys keep their load order.
    filtered.sort_by(|a, b| params.sort.compare(a, b));

    let page_size = params.page_size.max(1);
    let total_items = filtered.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = params.page.max(1).min(total_pages.max(1));

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    Paginated::new(items, page, page_size, total_items)
}
