//! Wiring & DI. Entry point: bootstrap adapters, inject into the service, run UI.
//! No business logic here.
//!
//! `closed-days window` prints the published calendar window as JSON;
//! with no arguments the interactive admin menu runs.

use closed_days::adapters::clock::LocalClock;
use closed_days::adapters::persistence::ledger_json::LEDGER_FILE;
use closed_days::adapters::persistence::{JsonLedger, SqliteLedger};
use closed_days::adapters::ui::tui::TuiInputPort;
use closed_days::ports::{ClockPort, InputPort, LedgerPort};
use closed_days::shared::config::{AppConfig, LedgerBackend};
use closed_days::usecases::CalendarService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
    let data_path = PathBuf::from(cfg.data_dir_or_default());
    let window_months = cfg.window_months_or_default();

    let ledger: Arc<dyn LedgerPort> = match cfg.ledger_backend_or_default() {
        LedgerBackend::Json => {
            let path = data_path.join(LEDGER_FILE);
            info!(path = %path.display(), "using JSON override ledger");
            Arc::new(JsonLedger::new(path))
        }
        LedgerBackend::Sqlite => Arc::new(
            SqliteLedger::connect(&data_path)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        ),
    };
    let clock: Arc<dyn ClockPort> = Arc::new(
        LocalClock::new(cfg.utc_offset_hours_or_default()).map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let service = Arc::new(CalendarService::new(ledger, clock));

    if std::env::args().nth(1).as_deref() == Some("window") {
        let window = service.get_calendar_window(window_months).await;
        println!("{}", serde_json::to_string_pretty(&window)?);
        return Ok(());
    }

    closed_days::adapters::ui::init_ui();
    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(Arc::clone(&service), window_months));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
