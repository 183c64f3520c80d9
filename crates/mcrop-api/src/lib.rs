//! Axum HTTP API server.
//!
//! This crate provides:
//! - Upload preview (representative frame + true pixel dimensions)
//! - Crop processing (Probe -> Mapper -> Planner -> Executor -> Store)
//! - Artifact download and static thumbnail/output serving

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
