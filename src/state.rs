//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use crate::services::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub vehicle_service: VehicleService,
    /// redis, memory o none; se reporta en /health
    pub cache_backend: &'static str,
}

impl AppState {
    pub fn new(vehicle_service: VehicleService, cache_backend: &'static str) -> Self {
        Self {
            vehicle_service,
            cache_backend,
        }
    }
}
