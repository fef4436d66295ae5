//! HTTP handlers for the admin settings page, featured product writes and the storefront block.

pub mod products;
pub mod settings;
pub mod storefront;
pub use products::*;
pub use settings::*;
pub use storefront::*;
