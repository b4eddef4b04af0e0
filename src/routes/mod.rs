//! Route wiring: resource CRUD, health, and the middleware stack.

mod common;
mod resource;

pub use common::{app, common_routes};
pub use resource::resource_routes;
