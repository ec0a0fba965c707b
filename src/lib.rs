pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod text_correction;
pub mod translate;

pub use crate::config::Config;
pub use crate::error::ProxyError;
pub use crate::routes::create_app;
pub use crate::state::AppState;
