//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del catálogo de vehículos y la
//! especificación de búsqueda.

pub mod search;
pub mod vehicle;

pub use search::{Pagination, SearchFilter, SortOrder};
pub use vehicle::{Brand, FuelType, Transmission, Vehicle, VehicleRow, VehicleType};
