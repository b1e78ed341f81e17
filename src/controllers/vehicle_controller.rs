use rust_decimal::Decimal;
use std::str::FromStr;

use crate::dto::vehicle_dto::{ListVehiclesQuery, VehicleListResponse, VehicleSearchResponse};
use crate::models::{Brand, FuelType, SearchFilter, Transmission, Vehicle, VehicleType};
use crate::services::{FilterVocabulary, VehicleService};
use crate::utils::errors::{bad_request_error, AppError};

pub struct VehicleController {
    service: VehicleService,
}

impl VehicleController {
    pub fn new(service: VehicleService) -> Self {
        Self { service }
    }

    pub async fn list(&self, query: ListVehiclesQuery) -> Result<VehicleListResponse, AppError> {
        let page = parse_or(query.page.as_deref(), 1);
        let limit = parse_or(query.limit.as_deref(), 20);

        let page = self.service.list(page, limit).await?;
        Ok(VehicleListResponse::from(page))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Vehicle, AppError> {
        let id: i32 = id
            .trim()
            .parse()
            .map_err(|_| bad_request_error("ID inválido"))?;

        self.service.get_by_id(id).await
    }

    pub async fn search(&self, filter: SearchFilter) -> Result<VehicleSearchResponse, AppError> {
        let page = self.service.search(&filter).await?;
        Ok(VehicleSearchResponse::new(page, filter))
    }

    pub async fn filters(&self) -> Result<FilterVocabulary, AppError> {
        self.service.filter_vocabulary().await
    }

    pub async fn brands(&self) -> Result<Vec<Brand>, AppError> {
        self.service.brands().await
    }

    pub async fn vehicle_types(&self) -> Result<Vec<VehicleType>, AppError> {
        self.service.vehicle_types().await
    }

    pub async fn fuel_types(&self) -> Result<Vec<FuelType>, AppError> {
        self.service.fuel_types().await
    }

    pub async fn transmissions(&self) -> Result<Vec<Transmission>, AppError> {
        self.service.transmissions().await
    }
}

fn parse_or<T: FromStr>(value: Option<&str>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or(default),
        None => default,
    }
}

/// Construir un `SearchFilter` desde parámetros de query string.
///
/// Los ids pueden repetirse (`brand_id=3&brand_id=7`). Los valores que no
/// se pueden interpretar se ignoran. Un número mal formado en `page` o
/// `limit` queda en 0 y la normalización lo lleva al valor por defecto.
pub fn parse_search_params(params: &[(String, String)]) -> SearchFilter {
    let mut filter = SearchFilter::default();

    for (key, value) in params {
        let value = value.trim();
        match key.as_str() {
            "q" | "query" => filter.query = value.to_string(),
            "sort_by" => filter.sort_by = value.to_string(),
            "page" => filter.page = value.parse().unwrap_or(0),
            "limit" => filter.limit = value.parse().unwrap_or(0),
            "price_min" => {
                if let Ok(v) = Decimal::from_str(value) {
                    filter.price_min = v;
                }
            }
            "price_max" => {
                if let Ok(v) = Decimal::from_str(value) {
                    filter.price_max = v;
                }
            }
            "year_min" => filter.year_min = value.parse().unwrap_or(filter.year_min),
            "year_max" => filter.year_max = value.parse().unwrap_or(filter.year_max),
            "doors_min" => filter.doors_min = value.parse().unwrap_or(filter.doors_min),
            "seats_min" => filter.seats_min = value.parse().unwrap_or(filter.seats_min),
            "fuel_economy_min" => {
                filter.fuel_economy_min = value.parse().unwrap_or(filter.fuel_economy_min)
            }
            "brand_id" => push_id(&mut filter.brand_ids, value),
            "type_id" => push_id(&mut filter.type_ids, value),
            "fuel_type_id" => push_id(&mut filter.fuel_type_ids, value),
            "transmission_id" => push_id(&mut filter.transmission_ids, value),
            _ => {}
        }
    }

    filter
}

fn push_id(ids: &mut Vec<i32>, value: &str) {
    if let Ok(id) = value.parse() {
        ids.push(id);
    }
}
