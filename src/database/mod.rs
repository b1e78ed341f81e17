//! Módulo de base de datos
//!
//! Maneja la conexión con PostgreSQL, el constructor de predicados y las
//! sentencias SQL del catálogo.

pub mod connection;
pub mod predicate;
pub mod vehicle_queries;

pub use connection::create_pool;
pub use predicate::{PredicateBuilder, SqlValue, WhereClause};
pub use vehicle_queries::SqlQuery;
