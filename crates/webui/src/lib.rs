pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod forms;
pub mod model;
pub mod nav;
pub mod state;
pub mod table;
pub mod util;

/// Path of the REST API relative to the configured base URL.
pub const API_PREFIX: &str = "feicom/api/";
