//! HTTP handlers for resource CRUD and the health report.

pub mod health;
pub mod resource;
pub use health::*;
pub use resource::*;
