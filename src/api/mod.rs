mod assets;
mod error;
mod handlers;
mod helpers;
mod router;
mod types;

pub use error::ApiError;
pub use router::build_router;
pub use types::AppState;
