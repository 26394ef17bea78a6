pub mod config;
pub mod store;
pub mod models;
pub mod booking;
pub mod catalog;
pub mod controllers;
pub mod middleware;
pub mod seed;

use std::sync::Arc;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub store: store::Store,
    pub booking: booking::BookingService,
    pub catalog: catalog::CatalogService,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let store = store::Store::new();
        let booking = booking::BookingService::new(store.clone());
        let catalog = catalog::CatalogService::new(store.clone());

        Arc::new(Self {
            store,
            booking,
            catalog,
            config,
        })
    }
}
