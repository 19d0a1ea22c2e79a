//! Batch job logging upcoming fiscal deadlines and the portfolio summary.

use std::env;

use chrono::Local;
use config::Config;
use dotenvy::dotenv;

use fiscal_crm::db::establish_connection_pool;
use fiscal_crm::models::config::AppConfig;
use fiscal_crm::repository::DieselRepository;
use fiscal_crm::domain::document::DocumentValidity;
use fiscal_crm::services::{main as dashboard, notifications, users};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {}", err);
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    if let Some(email) = &app_config.user_email {
        match users::load_current_user(&repo, email) {
            Ok(Some(user)) => log::info!("Running as {} ({})", user.name, user.role.as_str()),
            Ok(None) => log::warn!("Configured user {email} is not available"),
            Err(e) => log::error!("Failed to load configured user: {e}"),
        }
    }

    let today = Local::now().date_naive();
    let data = match dashboard::load_dashboard(&repo, today, app_config.deadline_window_days) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Failed to load dashboard: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "{} clients, {} active, {} with pending regularity",
        data.stats.total,
        data.stats.active,
        data.stats.pending_regularity
    );

    if data.deadlines.is_empty() {
        log::info!(
            "No deadlines in the next {} days",
            app_config.deadline_window_days
        );
    }

    for notice in &data.deadlines {
        let when = match notice.days_left {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        log::warn!(
            "{}: {} (#{}) due {} {}",
            notice.kind,
            notice.legal_name,
            notice.client_id,
            notice.due_date,
            when
        );
    }

    let documents =
        match notifications::expiring_documents(&repo, today, app_config.document_warning_days) {
            Ok(documents) => documents,
            Err(e) => {
                log::error!("Failed to check documents: {e}");
                std::process::exit(1);
            }
        };

    for notice in &documents {
        match notice.validity {
            DocumentValidity::Expired => log::warn!(
                "{} of {} (#{}) has expired",
                notice.document.name,
                notice.legal_name,
                notice.client_id
            ),
            DocumentValidity::ExpiringSoon { days_left } => log::warn!(
                "{} of {} (#{}) expires in {days_left} days",
                notice.document.name,
                notice.legal_name,
                notice.client_id
            ),
            DocumentValidity::Valid | DocumentValidity::NoExpiry => {}
        }
    }
}
