//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores compartido por todas las capas.

pub mod errors;

pub use errors::{AppError, AppResult};
