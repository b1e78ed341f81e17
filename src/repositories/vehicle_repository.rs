//! Repositorio de vehículos
//!
//! Ejecuta el protocolo de dos fases (conteo + página) compartido por el
//! listado y la búsqueda, enriquece cada fila con sus características y
//! resuelve las lecturas por id a través de la caché.

use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::vehicle_store::VehicleStore;
use crate::cache::CacheAside;
use crate::models::{
    Brand, FuelType, Pagination, SearchFilter, Transmission, Vehicle, VehicleType,
};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Sub-consultas de características en vuelo por página
const FEATURE_CONCURRENCY: usize = 8;

/// Resultado de un listado paginado
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePage {
    pub vehicles: Vec<Vehicle>,
    pub total: i64,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct VehicleRepository {
    store: Arc<dyn VehicleStore>,
    cache: CacheAside,
    query_timeout: Duration,
}

impl VehicleRepository {
    pub fn new(store: Arc<dyn VehicleStore>, cache: CacheAside, query_timeout: Duration) -> Self {
        Self {
            store,
            cache,
            query_timeout,
        }
    }

    /// Aplica el timeout de consulta; al expirar la consulta en vuelo se abandona
    async fn timed<T, Fut>(&self, operation: &str, fut: Fut) -> AppResult<T>
    where
        Fut: Future<Output = AppResult<T>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(format!(
                "{} exceeded {}ms",
                operation,
                self.query_timeout.as_millis()
            ))),
        }
    }

    /// Listado sin filtros: mismo procedimiento que la búsqueda
    pub async fn list(&self, page: i64, limit: i64) -> AppResult<VehiclePage> {
        self.run_paginated(&SearchFilter::unfiltered(page, limit)).await
    }

    pub async fn search(&self, filter: &SearchFilter) -> AppResult<VehiclePage> {
        self.run_paginated(filter).await
    }

    /// Conteo, página ordenada y enriquecimiento con características
    async fn run_paginated(&self, filter: &SearchFilter) -> AppResult<VehiclePage> {
        let pagination = filter.pagination();
        let order = filter.sort_order();

        let total = self
            .timed("count vehicles", self.store.count_vehicles(filter))
            .await?;

        let rows = self
            .timed(
                "fetch vehicle page",
                self.store.fetch_vehicle_page(filter, order, pagination),
            )
            .await?;

        debug!(
            "📄 Página {} (limit {}): {} de {} vehículos",
            pagination.page,
            pagination.limit,
            rows.len(),
            total
        );

        let vehicles = self.attach_features(rows).await;

        Ok(VehiclePage {
            vehicles,
            total,
            pagination,
        })
    }

    /// Una sub-consulta por vehículo, concurrente pero en el orden original.
    /// Un fallo deja solo ese vehículo con `features` vacías.
    async fn attach_features(&self, rows: Vec<Vehicle>) -> Vec<Vehicle> {
        let enriched = rows.into_iter().map(|vehicle| self.with_features(vehicle));
        stream::iter(enriched)
            .buffered(FEATURE_CONCURRENCY)
            .collect()
            .await
    }

    async fn with_features(&self, mut vehicle: Vehicle) -> Vehicle {
        vehicle.features = self.features_or_empty(vehicle.id).await;
        vehicle
    }

    async fn features_or_empty(&self, vehicle_id: i32) -> Vec<String> {
        match self
            .timed("fetch features", self.store.fetch_features(vehicle_id))
            .await
        {
            Ok(features) => features,
            Err(e) => {
                warn!(
                    "⚠️ No se pudieron cargar características del vehículo {}: {}",
                    vehicle_id, e
                );
                Vec::new()
            }
        }
    }

    /// Lectura por id con caché cache-aside
    pub async fn get_by_id(&self, id: i32) -> AppResult<Vehicle> {
        let key = CacheAside::key("vehicle", id);
        self.cache
            .get_or_load(&key, move || self.load_vehicle(id))
            .await
    }

    async fn load_vehicle(&self, id: i32) -> AppResult<Vehicle> {
        let vehicle = self
            .timed("fetch vehicle", self.store.fetch_vehicle(id))
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(self.with_features(vehicle).await)
    }

    /// Elimina el snapshot de un vehículo (para un futuro camino de escritura)
    pub async fn invalidate_vehicle(&self, id: i32) -> u64 {
        self.cache
            .invalidate_pattern(&CacheAside::key("vehicle", id))
            .await
    }

    pub async fn invalidate_all_vehicles(&self) -> u64 {
        self.cache.invalidate_pattern("vehicle:*").await
    }

    pub async fn brands(&self) -> AppResult<Vec<Brand>> {
        self.timed("fetch brands", self.store.fetch_brands()).await
    }

    pub async fn vehicle_types(&self) -> AppResult<Vec<VehicleType>> {
        self.timed("fetch vehicle types", self.store.fetch_vehicle_types())
            .await
    }

    pub async fn fuel_types(&self) -> AppResult<Vec<FuelType>> {
        self.timed("fetch fuel types", self.store.fetch_fuel_types())
            .await
    }

    pub async fn transmissions(&self) -> AppResult<Vec<Transmission>> {
        self.timed("fetch transmissions", self.store.fetch_transmissions())
            .await
    }
}
