pub mod api;
pub mod config;
pub mod db;
pub mod records;
pub mod session;
pub mod store;

pub use api::{build_router, ApiError, AppState};
pub use config::ServerConfig;
pub use session::{AdminCredential, SessionStore};
