//! Rutas HTTP del API

pub mod vehicle_routes;
