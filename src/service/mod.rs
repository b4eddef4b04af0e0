//! ResourceService: generic list/get/create/update/delete over any resource schema.

mod resource;
mod validation;
pub use resource::{merge, ResourceService};
pub use validation::{is_truthy, RequestValidator};
