//! Application state behind the client dashboard.
//!
//! [`AppState`] owns the loaded clients, the list parameters and the derived
//! page. Every mutation recomputes the page through [`pipeline::process`] and
//! hands it to the registered [`ViewListener`]s. Nothing here is global: the
//! binding layer constructs one state and routes typed [`UiEvent`]s into it.

use std::time::{Duration, Instant};

use crate::domain::client::Client;
use crate::domain::types::{ClientId, Uf};
use crate::domain::user::User;
use crate::models::config::AppConfig;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::pipeline::{self, ClientFilters, ListParams, SortDirection, SortField, SortOrder};

/// Delay applied to search keystrokes before the list is filtered.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Filter selectors shown above the client table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    Company,
    Situation,
    TaxRegime,
    Uf,
}

/// Input coming from the view layer.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Fresh client list from the store.
    ClientsLoaded(Vec<Client>),
    /// Keystroke in the search box; applied once the debounce delay passes.
    SearchTyped { term: String, at: Instant },
    /// Search applied immediately (enter key, paste).
    SearchSubmitted(String),
    FilterChanged { field: FilterField, value: String },
    FiltersCleared,
    /// Column header click.
    SortRequested(SortField),
    PageRequested(usize),
    PageSizeChanged(usize),
    EditRequested(ClientId),
    CreateRequested,
    EditingClosed,
}

/// Receives every recomputed page.
pub trait ViewListener {
    fn on_view(&mut self, view: &Paginated<Client>);
}

/// Holds back search terms until typing pauses for `delay`.
#[derive(Clone, Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending term and restarts the delay from `now`.
    pub fn push(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    /// Releases the pending term once `delay` has elapsed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(term, _)| term)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

/// What the client modal is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditContext {
    Creating,
    Editing(ClientId),
}

pub struct AppState {
    clients: Vec<Client>,
    params: ListParams,
    view: Paginated<Client>,
    debouncer: SearchDebouncer,
    listeners: Vec<Box<dyn ViewListener>>,
    editing: Option<EditContext>,
    user: Option<User>,
}

impl AppState {
    /// Empty state using the configured page size and search delay.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.page_size, config.search_debounce())
    }

    pub fn new(page_size: usize, search_delay: Duration) -> Self {
        let params = ListParams {
            page_size: page_size.max(1),
            ..ListParams::default()
        };
        let view = Paginated::new(Vec::new(), 1, params.page_size, 0);
        Self {
            clients: Vec::new(),
            params,
            view,
            debouncer: SearchDebouncer::new(search_delay),
            listeners: Vec::new(),
            editing: None,
            user: None,
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Current page as last computed.
    pub fn view(&self) -> &Paginated<Client> {
        &self.view
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn editing(&self) -> Option<EditContext> {
        self.editing
    }

    pub fn subscribe(&mut self, listener: Box<dyn ViewListener>) {
        self.listeners.push(listener);
    }

    fn recompute(&mut self) {
        self.view = pipeline::process(&self.clients, &self.params);
        log::debug!(
            "Client view recomputed: page {}/{} ({} items)",
            self.view.page,
            self.view.total_pages,
            self.view.total_items
        );
        for listener in &mut self.listeners {
            listener.on_view(&self.view);
        }
    }

    /// Swaps in a freshly loaded client list.
    pub fn replace_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
        self.params.page = 1;
        self.recompute();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.params.search = term.into();
        self.params.page = 1;
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: ClientFilters) {
        self.params.filters = filters;
        self.params.page = 1;
        self.recompute();
    }

    /// Applies a raw selector value. Blank or unrecognised values clear the filter.
    pub fn set_filter(&mut self, field: FilterField, raw: &str) {
        let value = raw.trim();
        let text = (!value.is_empty()).then(|| value.to_string());
        let filters = &mut self.params.filters;
        match field {
            FilterField::Company => filters.company = text,
            FilterField::TaxRegime => filters.tax_regime = text,
            FilterField::Situation => {
                filters.situation = text.and_then(|v| v.parse().ok());
            }
            FilterField::Uf => filters.uf = text.and_then(|v| Uf::new(v).ok()),
        }
        self.params.page = 1;
        self.recompute();
    }

    /// Resets search and every filter. Sort and page size are kept.
    pub fn clear_filters(&mut self) {
        self.params.search.clear();
        self.params.filters = ClientFilters::default();
        self.params.page = 1;
        self.recompute();
    }

    /// Same field flips the direction; a new field starts ascending.
    pub fn sort_by(&mut self, field: SortField) {
        let sort = &mut self.params.sort;
        if sort.field == field {
            sort.direction = sort.direction.toggled();
        } else {
            *sort = SortOrder {
                field,
                direction: SortDirection::Ascending,
            };
        }
        self.params.page = 1;
        self.recompute();
    }

    /// Stores the requested page; out-of-range requests are clamped on recompute.
    pub fn go_to_page(&mut self, page: usize) {
        self.params.page = page;
        self.recompute();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.params.page_size = page_size.max(1);
        self.params.page = 1;
        self.recompute();
    }

    /// Feeds a keystroke to the debouncer without touching the view.
    pub fn type_search(&mut self, term: impl Into<String>, now: Instant) {
        self.debouncer.push(term, now);
    }

    /// Applies a debounced search term if one is due. Returns whether it did.
    pub fn flush_search(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => {
                self.set_search(term);
                true
            }
            None => false,
        }
    }

    /// Opens the edit context for a loaded client.
    pub fn begin_edit(&mut self, id: ClientId) -> Option<&Client> {
        let Some(client) = self.clients.iter().find(|c| c.id == id) else {
            log::warn!("Cannot edit client {id}: not loaded");
            return None;
        };
        self.editing = Some(EditContext::Editing(id));
        Some(client)
    }

    pub fn begin_create(&mut self) {
        self.editing = Some(EditContext::Creating);
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::ClientsLoaded(clients) => self.replace_clients(clients),
            UiEvent::SearchTyped { term, at } => self.type_search(term, at),
            UiEvent::SearchSubmitted(term) => self.set_search(term),
            UiEvent::FilterChanged { field, value } => self.set_filter(field, &value),
            UiEvent::FiltersCleared => self.clear_filters(),
            UiEvent::SortRequested(field) => self.sort_by(field),
            UiEvent::PageRequested(page) => self.go_to_page(page),
            UiEvent::PageSizeChanged(size) => self.set_page_size(size),
            UiEvent::EditRequested(id) => {
                self.begin_edit(id);
            }
            UiEvent::CreateRequested => self.begin_create(),
            UiEvent::EditingClosed => self.close_editor(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE, DEFAULT_SEARCH_DEBOUNCE)
    }
}
