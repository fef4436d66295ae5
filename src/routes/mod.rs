pub mod common;
pub mod featured;

pub use common::ops_routes;
pub use featured::{admin_routes, storefront_routes};
