//! Repositorios
//!
//! Acceso de lectura al catálogo: puerto del almacén primario y ejecutor
//! paginado con caché.

pub mod vehicle_repository;
pub mod vehicle_store;

pub use vehicle_repository::{VehiclePage, VehicleRepository};
pub use vehicle_store::{PgVehicleStore, VehicleStore};
