//! FeaturedService plus the request validation it runs before any write.

mod featured;
pub mod validation;
pub use featured::{FeaturedService, SettingsPage, SettingsProps, StoreSettingsView, StorefrontBlock};
pub use validation::{RequestValidator, SettingsUpdate, ValidationRule};
