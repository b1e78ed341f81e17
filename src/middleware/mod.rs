//! Middleware del sistema
//!
//! Este módulo contiene la configuración de CORS del API.

pub mod cors;

pub use cors::*;
