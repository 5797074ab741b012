//! Core conversion abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRequest, ConversionResult};
pub use currency::{CurrencyDirectory, CurrencyPair, CurrencyRecord, RateProvider, RateQuote};
pub use error::{ConversionError, ConvertError, DirectoryError};
