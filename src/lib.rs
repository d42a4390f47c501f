pub mod api;
pub mod config;
pub mod error;
pub mod interactions;
pub mod market;
pub mod middleware;
pub mod utils;

// Re-export common modules
pub use api::router;
pub use config::Config;
pub use error::AppError;
