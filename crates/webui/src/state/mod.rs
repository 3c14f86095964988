//! Reducers holding what the pages last fetched, and the async operations feeding them.

pub mod auth;
pub mod grid;
pub mod resource;

pub use auth::{AuthAction, AuthState};
pub use grid::{GridAction, GridFilters, GridState};
pub use resource::{Operation, ResourceAction, ResourceState};
