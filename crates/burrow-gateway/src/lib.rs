//! HTTP front end for the Burrow URL shortener.
//!
//! Translates requests into [`MappingLifecycle`](burrow_lifecycle::MappingLifecycle)
//! calls and renders the resulting outcomes as JSON responses or redirects.

pub mod app;
pub mod handlers;
pub mod model;
pub mod response;
pub mod state;

pub use app::App;
pub use response::ApiResponse;
pub use state::AppState;
