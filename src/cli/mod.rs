pub mod convert;
pub mod currencies;
pub mod interactive;
pub mod setup;
pub mod swap;
pub mod ui;
