//! Local HTTP server for the index, viewer and compare pages.

pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use state::AppState;
