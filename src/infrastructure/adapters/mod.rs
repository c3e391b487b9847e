pub mod mysql_currency_repository;
pub mod mysql_order_repository;
pub mod paygate_adapter;

pub use mysql_currency_repository::MySqlCurrencyRepository;
pub use mysql_order_repository::MySqlOrderRepository;
pub use paygate_adapter::PayGateAdapter;
