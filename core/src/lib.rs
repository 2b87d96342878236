pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod join;
pub mod loader;
pub mod model;
pub mod render;
pub mod view;
