//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del servicio desde el entorno (con
//! `.env` cargado por `dotenvy` en `main`).

use std::env;
use std::time::Duration;
use thiserror::Error;

use super::database::DatabaseConfig;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Backend de caché seleccionado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Redis(String),
    Memory,
    None,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub cache: CacheBackend,
    pub query_timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Leer configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => 8080,
        };

        // 0 haría expirar cada consulta al instante
        let query_timeout_secs: u64 = match get("QUERY_TIMEOUT_SECS") {
            Some(value) => match value.parse() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "QUERY_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => 10,
        };

        let redis_url = get("REDIS_URL");
        let cache = match get("CACHE_BACKEND").as_deref().map(str::to_lowercase).as_deref() {
            Some("memory") => CacheBackend::Memory,
            Some("none") => CacheBackend::None,
            Some("redis") => CacheBackend::Redis(
                redis_url.ok_or(ConfigError::Missing("REDIS_URL"))?,
            ),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "CACHE_BACKEND",
                    value: other.to_string(),
                })
            }
            None => match redis_url {
                Some(url) => CacheBackend::Redis(url),
                None => CacheBackend::None,
            },
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database: DatabaseConfig::new(database_url),
            cache,
            query_timeout: Duration::from_secs(query_timeout_secs),
            cors_origins,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
