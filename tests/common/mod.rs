//! Almacén en memoria para los tests de integración

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vehicle_catalog::cache::{CacheAside, MemoryCache};
use vehicle_catalog::models::{
    Brand, FuelType, Pagination, SearchFilter, SortOrder, Transmission, Vehicle, VehicleType,
};
use vehicle_catalog::repositories::VehicleStore;
use vehicle_catalog::services::VehicleService;
use vehicle_catalog::utils::errors::{AppError, AppResult};

pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

pub fn brand(id: i32) -> Brand {
    Brand {
        id,
        name: format!("Marca {}", id),
        logo: format!("https://cdn.example.com/brands/{}.png", id),
        country: "México".to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn vehicle(id: i32, brand_id: i32, price: i64, year: i32) -> Vehicle {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        + chrono::Duration::minutes(id as i64);

    Vehicle {
        id,
        brand_id,
        brand: brand(brand_id),
        model: format!("Modelo {}", id),
        year,
        type_id: 1,
        vehicle_type: VehicleType {
            id: 1,
            name: "SUV".to_string(),
        },
        price: Decimal::from(price),
        currency: "MXN".to_string(),
        fuel_type_id: 1,
        fuel_type: FuelType {
            id: 1,
            name: "Gasolina".to_string(),
        },
        transmission_id: 1,
        transmission: Transmission {
            id: 1,
            name: "Automática".to_string(),
        },
        doors: 4,
        seats: 5,
        engine_size: 2.0,
        horsepower: 150,
        torque: 200,
        fuel_economy: 12.5 + id as f64 / 10.0,
        tank_capacity: 50.0,
        cargo_space: 400.0,
        image_url: String::new(),
        description: format!("Vehículo de prueba {}", id),
        features: Vec::new(),
        safety_rating: 4.5,
        created_at: timestamp,
        updated_at: timestamp,
    }
}

/// Catálogo de `count` vehículos con marcas alternando entre 1..=10
pub fn catalog(count: i32) -> Vec<Vehicle> {
    (1..=count)
        .map(|id| vehicle(id, (id - 1) % 10 + 1, 200_000 + (id as i64 * 7_919) % 500_000, 2015 + id % 10))
        .collect()
}

#[derive(Default)]
pub struct FakeStore {
    pub vehicles: Vec<Vehicle>,
    pub failing_features: HashSet<i32>,
    pub unreachable: AtomicBool,
    pub fail_fuel_types: bool,
    pub delay: Option<Duration>,
    pub fetch_vehicle_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub last_order: Mutex<Option<SortOrder>>,
}

impl FakeStore {
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles,
            ..Self::default()
        }
    }

    pub fn set_unreachable(&self, value: bool) {
        self.unreachable.store(value, Ordering::SeqCst);
    }

    async fn check(&self) -> AppResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn matching(&self, filter: &SearchFilter) -> Vec<Vehicle> {
        let query = filter.query.trim().to_lowercase();

        self.vehicles
            .iter()
            .filter(|v| filter.brand_ids.is_empty() || filter.brand_ids.contains(&v.brand_id))
            .filter(|v| filter.type_ids.is_empty() || filter.type_ids.contains(&v.type_id))
            .filter(|v| {
                filter.fuel_type_ids.is_empty() || filter.fuel_type_ids.contains(&v.fuel_type_id)
            })
            .filter(|v| {
                filter.transmission_ids.is_empty()
                    || filter.transmission_ids.contains(&v.transmission_id)
            })
            .filter(|v| filter.price_min.is_zero() || v.price >= filter.price_min)
            .filter(|v| filter.price_max.is_zero() || v.price <= filter.price_max)
            .filter(|v| filter.year_min == 0 || v.year >= filter.year_min)
            .filter(|v| filter.year_max == 0 || v.year <= filter.year_max)
            .filter(|v| filter.doors_min == 0 || v.doors >= filter.doors_min)
            .filter(|v| filter.seats_min == 0 || v.seats >= filter.seats_min)
            .filter(|v| filter.fuel_economy_min == 0.0 || v.fuel_economy >= filter.fuel_economy_min)
            .filter(|v| {
                query.is_empty()
                    || v.model.to_lowercase().contains(&query)
                    || v.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VehicleStore for FakeStore {
    async fn count_vehicles(&self, filter: &SearchFilter) -> AppResult<i64> {
        self.check().await?;
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.matching(filter).len() as i64)
    }

    async fn fetch_vehicle_page(
        &self,
        filter: &SearchFilter,
        order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<Vec<Vehicle>> {
        self.check().await?;
        if let Ok(mut last) = self.last_order.lock() {
            *last = Some(order);
        }

        let mut rows = self.matching(filter);
        match order {
            SortOrder::PriceAsc => rows.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => rows.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::YearDesc => rows.sort_by(|a, b| b.year.cmp(&a.year)),
            SortOrder::FuelEconomyDesc => {
                rows.sort_by(|a, b| b.fuel_economy.total_cmp(&a.fuel_economy))
            }
            SortOrder::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        Ok(rows
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn fetch_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>> {
        self.check().await?;
        self.fetch_vehicle_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn fetch_features(&self, vehicle_id: i32) -> AppResult<Vec<String>> {
        self.check().await?;
        if self.failing_features.contains(&vehicle_id) {
            return Err(AppError::Database(sqlx::Error::RowNotFound));
        }
        Ok(vec![
            format!("Característica A{}", vehicle_id),
            format!("Característica B{}", vehicle_id),
        ])
    }

    async fn fetch_brands(&self) -> AppResult<Vec<Brand>> {
        self.check().await?;
        Ok((1..=3).map(brand).collect())
    }

    async fn fetch_vehicle_types(&self) -> AppResult<Vec<VehicleType>> {
        self.check().await?;
        Ok(vec![VehicleType {
            id: 1,
            name: "SUV".to_string(),
        }])
    }

    async fn fetch_fuel_types(&self) -> AppResult<Vec<FuelType>> {
        self.check().await?;
        if self.fail_fuel_types {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(vec![FuelType {
            id: 1,
            name: "Gasolina".to_string(),
        }])
    }

    async fn fetch_transmissions(&self) -> AppResult<Vec<Transmission>> {
        self.check().await?;
        Ok(vec![Transmission {
            id: 1,
            name: "Automática".to_string(),
        }])
    }
}

/// Servicio sobre el almacén en memoria con caché `MemoryCache`
pub fn service_with(store: Arc<FakeStore>) -> (VehicleService, Arc<MemoryCache>) {
    service_with_timeout(store, TEST_TIMEOUT)
}

pub fn service_with_timeout(
    store: Arc<FakeStore>,
    query_timeout: Duration,
) -> (VehicleService, Arc<MemoryCache>) {
    let memory = Arc::new(MemoryCache::new());
    let cache = CacheAside::new(memory.clone(), Duration::from_secs(300));
    (VehicleService::with_store(store, cache, query_timeout), memory)
}
