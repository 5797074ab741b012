pub mod cli;
pub mod core;
pub mod presenter;
pub mod providers;
pub mod store;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::RateProvider;
use crate::core::config::{API_KEY_ENV, AppConfig};
use crate::store::PreferenceStore;
use crate::store::disk::DiskPreferenceStore;
use crate::store::memory::MemoryPreferenceStore;

pub enum AppCommand {
    Convert {
        amount: Decimal,
        from: Option<String>,
        to: Option<String>,
    },
    Swap,
    Currencies,
    Interactive,
}

/// Shared services for a single command run.
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn PreferenceStore>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let store = open_preference_store(&config);
        Self { config, store }
    }

    pub fn rate_provider(&self) -> Result<Arc<dyn RateProvider>> {
        let api_key = self.config.api_key().with_context(|| {
            format!(
                "No exchange rate API key configured. Set {API_KEY_ENV} or providers.exchange_rate.api_key"
            )
        })?;
        Ok(Arc::new(
            providers::exchange_rate_api::ExchangeRateApiProvider::new(
                &self.config.providers.exchange_rate.base_url,
                &api_key,
            ),
        ))
    }
}

fn open_preference_store(config: &AppConfig) -> Arc<dyn PreferenceStore> {
    let opened = config
        .default_data_path()
        .and_then(|path| DiskPreferenceStore::open(&path));
    match opened {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Preferences will not be saved for this session");
            Arc::new(MemoryPreferenceStore::new())
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    run_command_with_output(command, config_path, &mut std::io::stdout()).await
}

/// Runs a command, writing its output to `out`.
///
/// The interactive form always talks to the terminal.
pub async fn run_command_with_output<W: Write>(
    command: AppCommand,
    config_path: Option<&str>,
    out: &mut W,
) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        rates = %config.providers.exchange_rate.base_url,
        directory = ?config.directory.source,
        "Loaded config"
    );

    let ctx = AppContext::new(config);
    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&ctx, amount, from.as_deref(), to.as_deref(), out).await
        }
        AppCommand::Swap => cli::swap::run(&ctx, out),
        AppCommand::Currencies => cli::currencies::run(&ctx, out).await,
        AppCommand::Interactive => cli::interactive::run(&ctx).await,
    }
}
