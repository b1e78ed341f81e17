//! Acceso al almacén primario
//!
//! `VehicleStore` es el puerto hacia la base de datos relacional: conteo y
//! página filtrados, lectura por id, características y datos de referencia.
//! `PgVehicleStore` lo implementa sobre PostgreSQL con SQLx.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::predicate::{to_pg_arguments, PredicateBuilder};
use crate::database::vehicle_queries::{
    by_id_query, count_query, page_query, BRANDS_QUERY, FEATURES_QUERY, FUEL_TYPES_QUERY,
    TRANSMISSIONS_QUERY, VEHICLE_TYPES_QUERY,
};
use crate::models::{
    Brand, FuelType, Pagination, SearchFilter, SortOrder, Transmission, Vehicle, VehicleRow,
    VehicleType,
};
use crate::utils::errors::AppResult;

/// Operaciones de lectura sobre el almacén primario
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// `SELECT COUNT(*)` con el predicado del filtro
    async fn count_vehicles(&self, filter: &SearchFilter) -> AppResult<i64>;

    /// Página de vehículos con referencias embebidas y `features` vacías
    async fn fetch_vehicle_page(
        &self,
        filter: &SearchFilter,
        order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<Vec<Vehicle>>;

    /// Un vehículo con referencias embebidas, `None` si no existe
    async fn fetch_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>>;

    async fn fetch_features(&self, vehicle_id: i32) -> AppResult<Vec<String>>;

    async fn fetch_brands(&self) -> AppResult<Vec<Brand>>;

    async fn fetch_vehicle_types(&self) -> AppResult<Vec<VehicleType>>;

    async fn fetch_fuel_types(&self) -> AppResult<Vec<FuelType>>;

    async fn fetch_transmissions(&self) -> AppResult<Vec<Transmission>>;
}

/// Implementación PostgreSQL
#[derive(Clone)]
pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn count_vehicles(&self, filter: &SearchFilter) -> AppResult<i64> {
        let clause = PredicateBuilder::from_filter(filter).finish();
        let query = count_query(&clause);

        let total: i64 = sqlx::query_scalar_with(&query.sql, to_pg_arguments(&query.params))
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn fetch_vehicle_page(
        &self,
        filter: &SearchFilter,
        order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<Vec<Vehicle>> {
        let clause = PredicateBuilder::from_filter(filter).finish();
        let query = page_query(&clause, order, pagination);

        let rows: Vec<VehicleRow> =
            sqlx::query_as_with(&query.sql, to_pg_arguments(&query.params))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn fetch_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let query = by_id_query(id);

        let row: Option<VehicleRow> =
            sqlx::query_as_with(&query.sql, to_pg_arguments(&query.params))
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn fetch_features(&self, vehicle_id: i32) -> AppResult<Vec<String>> {
        let features: Vec<String> = sqlx::query_scalar(FEATURES_QUERY)
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(features)
    }

    async fn fetch_brands(&self) -> AppResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(BRANDS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(brands)
    }

    async fn fetch_vehicle_types(&self) -> AppResult<Vec<VehicleType>> {
        let types = sqlx::query_as::<_, VehicleType>(VEHICLE_TYPES_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    async fn fetch_fuel_types(&self) -> AppResult<Vec<FuelType>> {
        let types = sqlx::query_as::<_, FuelType>(FUEL_TYPES_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(types)
    }

    async fn fetch_transmissions(&self) -> AppResult<Vec<Transmission>> {
        let transmissions = sqlx::query_as::<_, Transmission>(TRANSMISSIONS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(transmissions)
    }
}
