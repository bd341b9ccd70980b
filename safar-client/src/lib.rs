pub mod app_config;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod http;
pub mod inquiries;
pub mod session;

pub use app_config::Config;
pub use bookings::CreateBooking;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use session::{Session, SessionStore};
