//! Shared application state for all routes.

use crate::service::FeaturedService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeaturedService>,
}

impl AppState {
    pub fn new(service: Arc<FeaturedService>) -> Self {
        AppState { service }
    }
}
