//! Servicios de negocio
//!
//! Este módulo contiene la capa de orquestación del catálogo.

pub mod vehicle_service;

pub use vehicle_service::{FilterVocabulary, VehicleService};
