pub mod entities;
pub mod errors;
pub mod initiate;
pub mod response;
pub mod value_objects;

pub use entities::{BillingAddress, Currency, Order};
pub use errors::{DomainError, DomainResult};
pub use initiate::{Credentials, InitiateRequest};
pub use response::{GatewayError, InitiateOutcome};
pub use value_objects::OrderStatus;
