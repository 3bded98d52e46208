//! Web layer for the refuelling planner.
//!
//! Provides the trip form, the plan endpoint, and health checks.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router, plan_trip};
pub use state::AppState;
pub use templates::*;
