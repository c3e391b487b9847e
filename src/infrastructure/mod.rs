pub mod adapters;
pub mod config;

pub use adapters::{MySqlCurrencyRepository, MySqlOrderRepository, PayGateAdapter};
pub use config::PayGateConfig;
