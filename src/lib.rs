pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub store: store::PgStore,
    pub config: config::Config,
}
