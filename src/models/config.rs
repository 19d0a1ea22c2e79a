//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::deadline::DEFAULT_DEADLINE_WINDOW_DAYS;
use crate::domain::document::DEFAULT_WARNING_DAYS;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::state::DEFAULT_SEARCH_DEBOUNCE;

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_deadline_window_days() -> u64 {
    DEFAULT_DEADLINE_WINDOW_DAYS
}

fn default_document_warning_days() -> i64 {
    DEFAULT_WARNING_DAYS
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for the dashboard core and its batch jobs.
pub struct AppConfig {
    pub database_url: String,
    /// Operator whose session is loaded by command-line jobs.
    pub user_email: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_deadline_window_days")]
    pub deadline_window_days: u64,
    #[serde(default = "default_document_warning_days")]
    pub document_warning_days: i64,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl AppConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"database_url": "app.db"}"#).unwrap();

        assert_eq!(config.page_size, 10);
        assert_eq!(config.deadline_window_days, 30);
        assert_eq!(config.document_warning_days, 30);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.user_email, None);
    }
}
