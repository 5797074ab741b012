pub mod exchange_rate_api;
pub mod rest_countries;
pub mod static_directory;

use crate::core::CurrencyDirectory;
use crate::core::config::{AppConfig, DirectorySource};

/// Builds the currency directory selected in the config.
pub fn directory_from_config(config: &AppConfig) -> Box<dyn CurrencyDirectory> {
    match config.directory.source {
        DirectorySource::Static => Box::new(static_directory::StaticDirectory::new()),
        DirectorySource::Api => Box::new(rest_countries::RestCountriesDirectory::new(
            &config.providers.directory.base_url,
        )),
    }
}
