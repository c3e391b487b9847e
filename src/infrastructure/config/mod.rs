pub mod paygate_config;

pub use paygate_config::PayGateConfig;
