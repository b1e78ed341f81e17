//! Configuración de cache
//!
//! Este módulo contiene la configuración para el sistema de cache.

use std::time::Duration;

/// TTL fijo de los snapshots de vehículos (5 minutos)
pub const VEHICLE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Configuración del cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub connect_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: VEHICLE_CACHE_TTL,
            connect_timeout: Duration::from_secs(3),
        }
    }
}
