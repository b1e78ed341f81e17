//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y las entidades de referencia
//! (marca, tipo, combustible, transmisión) que se embeben por copia al leer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Marca - tabla brands
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub logo: String,
    pub country: String,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tipo de carrocería (SUV, Sedán, Pickup, Hatchback...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct VehicleType {
    pub id: i32,
    pub name: String,
}

/// Tipo de combustible (Gasolina, Diesel, Híbrido, Eléctrico)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct FuelType {
    pub id: i32,
    pub name: String,
}

/// Transmisión (Manual, Automática, CVT, Dual-Clutch)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Transmission {
    pub id: i32,
    pub name: String,
}

/// Vehicle principal con sus referencias ya resueltas.
///
/// `brand`, `vehicle_type`, `fuel_type` y `transmission` son copias tomadas
/// en el momento de la lectura, nunca se guardan desnormalizadas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub brand_id: i32,
    pub brand: Brand,
    pub model: String,
    pub year: i32,
    pub type_id: i32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub price: Decimal,
    pub currency: String,
    pub fuel_type_id: i32,
    pub fuel_type: FuelType,
    pub transmission_id: i32,
    pub transmission: Transmission,
    pub doors: i32,
    pub seats: i32,
    pub engine_size: f64,    // Litros
    pub horsepower: i32,
    pub torque: i32,         // Nm
    pub fuel_economy: f64,   // km/l
    pub tank_capacity: f64,  // Litros
    pub cargo_space: f64,    // Litros
    pub image_url: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub safety_rating: f64, // 0-5
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fila plana del JOIN vehicles ⨝ brands ⨝ vehicle_types ⨝ fuel_types ⨝ transmissions
#[derive(Debug, FromRow)]
pub struct VehicleRow {
    pub id: i32,
    pub brand_id: i32,
    pub model: String,
    pub year: i32,
    pub type_id: i32,
    pub price: Decimal,
    pub currency: String,
    pub fuel_type_id: i32,
    pub transmission_id: i32,
    pub doors: i32,
    pub seats: i32,
    pub engine_size: f64,
    pub horsepower: i32,
    pub torque: i32,
    pub fuel_economy: f64,
    pub tank_capacity: f64,
    pub cargo_space: f64,
    pub image_url: String,
    pub description: String,
    pub safety_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub brand_name: String,
    pub brand_logo: String,
    pub brand_country: String,
    pub type_name: String,
    pub fuel_type_name: String,
    pub transmission_name: String,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            brand_id: row.brand_id,
            brand: Brand {
                id: row.brand_id,
                name: row.brand_name,
                logo: row.brand_logo,
                country: row.brand_country,
                created_at: None,
                updated_at: None,
            },
            model: row.model,
            year: row.year,
            type_id: row.type_id,
            vehicle_type: VehicleType {
                id: row.type_id,
                name: row.type_name,
            },
            price: row.price,
            currency: row.currency,
            fuel_type_id: row.fuel_type_id,
            fuel_type: FuelType {
                id: row.fuel_type_id,
                name: row.fuel_type_name,
            },
            transmission_id: row.transmission_id,
            transmission: Transmission {
                id: row.transmission_id,
                name: row.transmission_name,
            },
            doors: row.doors,
            seats: row.seats,
            engine_size: row.engine_size,
            horsepower: row.horsepower,
            torque: row.torque,
            fuel_economy: row.fuel_economy,
            tank_capacity: row.tank_capacity,
            cargo_space: row.cargo_space,
            image_url: row.image_url,
            description: row.description,
            features: Vec::new(),
            safety_rating: row.safety_rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_row() -> VehicleRow {
        VehicleRow {
            id: 11,
            brand_id: 3,
            model: "Corolla".to_string(),
            year: 2024,
            type_id: 2,
            price: Decimal::new(38990000, 2),
            currency: "MXN".to_string(),
            fuel_type_id: 4,
            transmission_id: 1,
            doors: 4,
            seats: 5,
            engine_size: 1.8,
            horsepower: 138,
            torque: 172,
            fuel_economy: 25.3,
            tank_capacity: 43.0,
            cargo_space: 470.0,
            image_url: "/img/corolla.png".to_string(),
            description: "Sedán híbrido".to_string(),
            safety_rating: 4.5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            brand_name: "Toyota".to_string(),
            brand_logo: "/logos/toyota.svg".to_string(),
            brand_country: "Japón".to_string(),
            type_name: "Sedán".to_string(),
            fuel_type_name: "Híbrido".to_string(),
            transmission_name: "CVT".to_string(),
        }
    }

    #[test]
    fn test_row_embeds_reference_copies() {
        let vehicle = Vehicle::from(sample_row());

        assert_eq!(vehicle.brand.id, 3);
        assert_eq!(vehicle.brand.name, "Toyota");
        assert_eq!(vehicle.vehicle_type, VehicleType { id: 2, name: "Sedán".to_string() });
        assert_eq!(vehicle.fuel_type.id, vehicle.fuel_type_id);
        assert_eq!(vehicle.transmission.name, "CVT");
        assert!(vehicle.features.is_empty());
    }

    #[test]
    fn test_vehicle_json_uses_type_key() {
        let vehicle = Vehicle::from(sample_row());
        let json = serde_json::to_value(&vehicle).unwrap();

        assert_eq!(json["type"]["name"], "Sedán");
        assert!(json.get("vehicle_type").is_none());
        assert!(json["brand"].get("created_at").is_none());

        let back: Vehicle = serde_json::from_value(json).unwrap();
        assert_eq!(back, vehicle);
    }
}
