//! Servicio de consulta de vehículos
//!
//! Orquesta el repositorio para las operaciones públicas del catálogo:
//! listado, lectura por id, búsqueda y vocabulario de filtros.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::cache::CacheAside;
use crate::models::{Brand, FuelType, SearchFilter, Transmission, Vehicle, VehicleType};
use crate::repositories::{VehiclePage, VehicleRepository, VehicleStore};
use crate::utils::errors::AppResult;

/// Vocabulario completo de filtros: todo o nada
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterVocabulary {
    pub brands: Vec<Brand>,
    pub vehicle_types: Vec<VehicleType>,
    pub fuel_types: Vec<FuelType>,
    pub transmissions: Vec<Transmission>,
}

#[derive(Clone)]
pub struct VehicleService {
    repository: VehicleRepository,
}

impl VehicleService {
    pub fn new(repository: VehicleRepository) -> Self {
        Self { repository }
    }

    /// Construir el servicio sobre un almacén y una caché
    pub fn with_store(
        store: Arc<dyn VehicleStore>,
        cache: CacheAside,
        query_timeout: std::time::Duration,
    ) -> Self {
        Self::new(VehicleRepository::new(store, cache, query_timeout))
    }

    /// Listado paginado sin filtros
    pub async fn list(&self, page: i64, limit: i64) -> AppResult<VehiclePage> {
        self.repository.list(page, limit).await
    }

    /// Vehículo por id (NotFound si no existe)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Vehicle> {
        self.repository.get_by_id(id).await
    }

    /// Búsqueda filtrada y paginada
    pub async fn search(&self, filter: &SearchFilter) -> AppResult<VehiclePage> {
        self.repository.search(filter).await
    }

    /// Marcas, tipos, combustibles y transmisiones en paralelo
    pub async fn filter_vocabulary(&self) -> AppResult<FilterVocabulary> {
        let (brands, vehicle_types, fuel_types, transmissions) = tokio::try_join!(
            self.repository.brands(),
            self.repository.vehicle_types(),
            self.repository.fuel_types(),
            self.repository.transmissions(),
        )?;

        Ok(FilterVocabulary {
            brands,
            vehicle_types,
            fuel_types,
            transmissions,
        })
    }

    pub async fn brands(&self) -> AppResult<Vec<Brand>> {
        self.repository.brands().await
    }

    pub async fn vehicle_types(&self) -> AppResult<Vec<VehicleType>> {
        self.repository.vehicle_types().await
    }

    pub async fn fuel_types(&self) -> AppResult<Vec<FuelType>> {
        self.repository.fuel_types().await
    }

    pub async fn transmissions(&self) -> AppResult<Vec<Transmission>> {
        self.repository.transmissions().await
    }

    /// Invalida el snapshot cacheado de un vehículo tras una escritura
    pub async fn invalidate_vehicle(&self, id: i32) -> u64 {
        let removed = self.repository.invalidate_vehicle(id).await;
        info!("🗑️ Vehículo {} invalidado en cache ({} claves)", id, removed);
        removed
    }

    pub async fn invalidate_all_vehicles(&self) -> u64 {
        self.repository.invalidate_all_vehicles().await
    }
}
