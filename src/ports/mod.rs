pub mod currency_repository_port;
pub mod order_repository_port;
pub mod paygate_port;

pub use currency_repository_port::CurrencyRepositoryPort;
pub use order_repository_port::OrderRepositoryPort;
pub use paygate_port::{PayGatePort, ProcessRequest};
