pub mod dto;
pub mod payment_service;
pub mod redirect;

pub use dto::ErrorResponse;
pub use payment_service::PaymentService;
pub use redirect::RedirectPage;
