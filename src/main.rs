//! Shelfkeeper - library catalog bootstrap
//!
//! Prepares the stores and reports the state of the catalog. The interactive
//! menus drive the same `Library` API from their own front end.

use std::fs::File;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shelfkeeper::{config::LoggingConfig, AppConfig, Library};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _log_guard = init_tracing(&config.logging)?;

    tracing::info!("Starting Shelfkeeper v{}", env!("CARGO_PKG_VERSION"));

    let library = Library::open(config)?;
    let catalog = &library.services.catalog;
    let accounts = library.services.accounts.ledger().load();
    let on_loan = library.services.accounts.borrowed_report().len();

    tracing::info!(
        "Catalog ready: {} books, {} available, {} accounts, {} loans",
        catalog.len(),
        catalog.count_available(),
        accounts.len(),
        on_loan
    );

    println!("{}", catalog.display_all());
    println!(
        "\nTotal books: {} | Available: {}",
        catalog.len(),
        catalog.count_available()
    );

    Ok(())
}

/// Install the subscriber; the returned guard flushes the log file on drop
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("shelfkeeper={}", logging.level).into());
    let json = logging.format.eq_ignore_ascii_case("json");

    match &logging.file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);
            if json {
                tracing_subscriber::registry().with(filter).with(layer.json()).init();
            } else {
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            Ok(Some(guard))
        }
        None => {
            let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if json {
                tracing_subscriber::registry().with(filter).with(layer.json()).init();
            } else {
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            Ok(None)
        }
    }
}
