//! # Adextract Web
//!
//! axum HTTP surface over the `adextract-core` adapters.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dto`] | Query parameters and response bodies |
//! | [`error`] | `ApiError` boundary and `ServerError` exit codes |
//! | [`routes`] | Router and handlers |
//! | [`state`] | Shared adapter handles |

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, Operation, ServerError};
pub use routes::build_router;
pub use state::AppState;
