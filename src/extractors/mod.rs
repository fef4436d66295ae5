pub mod json;
pub mod referer;
pub mod store;

pub use json::JsonBody;
pub use referer::Referer;
pub use store::StoreId;
