//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /tasks` - Create a task
//! - `GET /tasks` - List tasks (pagination + status filter)
//! - `GET /tasks/{id}` - Fetch a task
//! - `PUT /tasks/{id}` - Partially update a task
//! - `DELETE /tasks/{id}` - Delete a task

mod routes;
pub mod tasks;
pub mod types;

pub use routes::{build_router, serve, AppState};
pub use types::ApiError;
