//! Sentencias SQL del catálogo
//!
//! Combina el predicado, el orden y la paginación en las dos consultas del
//! protocolo de listado (conteo + datos). El texto variable solo proviene de
//! constantes y de `SortOrder::as_sql`.

use super::predicate::{SqlValue, WhereClause};
use crate::models::{Pagination, SortOrder};

/// Columnas del JOIN principal, alineadas con `VehicleRow`
pub const VEHICLE_SELECT_COLUMNS: &str = r#"
    v.id, v.brand_id, v.model, v.year, v.type_id,
    v.price::numeric AS price, v.currency, v.fuel_type_id, v.transmission_id,
    v.doors, v.seats, v.engine_size::float8 AS engine_size, v.horsepower, v.torque,
    v.fuel_economy::float8 AS fuel_economy, v.tank_capacity::float8 AS tank_capacity,
    v.cargo_space::float8 AS cargo_space,
    COALESCE(v.image_url, '') AS image_url, COALESCE(v.description, '') AS description,
    v.safety_rating::float8 AS safety_rating,
    v.created_at, v.updated_at,
    b.name AS brand_name, COALESCE(b.logo, '') AS brand_logo, COALESCE(b.country, '') AS brand_country,
    vt.name AS type_name, ft.name AS fuel_type_name, t.name AS transmission_name"#;

/// JOINs internos: si falta una referencia la fila no aparece
pub const VEHICLE_JOINS: &str = r#"
    FROM vehicles v
    JOIN brands b ON v.brand_id = b.id
    JOIN vehicle_types vt ON v.type_id = vt.id
    JOIN fuel_types ft ON v.fuel_type_id = ft.id
    JOIN transmissions t ON v.transmission_id = t.id"#;

pub const FEATURES_QUERY: &str =
    "SELECT feature FROM vehicle_features WHERE vehicle_id = $1 ORDER BY id";

pub const BRANDS_QUERY: &str =
    "SELECT id, name, COALESCE(logo, '') AS logo, COALESCE(country, '') AS country, created_at, updated_at FROM brands ORDER BY name";
pub const VEHICLE_TYPES_QUERY: &str = "SELECT id, name FROM vehicle_types ORDER BY name";
pub const FUEL_TYPES_QUERY: &str = "SELECT id, name FROM fuel_types ORDER BY name";
pub const TRANSMISSIONS_QUERY: &str = "SELECT id, name FROM transmissions ORDER BY name";

/// Consulta lista para ejecutar: texto + parámetros en orden de slot
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Fase de conteo: `SELECT COUNT(*) FROM vehicles v [WHERE ...]`
pub fn count_query(clause: &WhereClause) -> SqlQuery {
    let sql = if clause.is_empty() {
        "SELECT COUNT(*) FROM vehicles v".to_string()
    } else {
        format!("SELECT COUNT(*) FROM vehicles v {}", clause.sql)
    };

    SqlQuery {
        sql,
        params: clause.params.clone(),
    }
}

/// Fase de datos: JOIN + WHERE + ORDER BY + LIMIT/OFFSET como últimos slots
pub fn page_query(clause: &WhereClause, order: SortOrder, pagination: Pagination) -> SqlQuery {
    let limit_slot = clause.next_slot;
    let offset_slot = clause.next_slot + 1;

    let sql = format!(
        "SELECT {columns} {joins} {filter} ORDER BY {order} LIMIT ${limit_slot} OFFSET ${offset_slot}",
        columns = VEHICLE_SELECT_COLUMNS,
        joins = VEHICLE_JOINS,
        filter = clause.sql,
        order = order.as_sql(),
    );

    let mut params = clause.params.clone();
    params.push(SqlValue::BigInt(pagination.limit));
    params.push(SqlValue::BigInt(pagination.offset()));

    SqlQuery { sql, params }
}

/// Lectura de una sola fila por id
pub fn by_id_query(id: i32) -> SqlQuery {
    SqlQuery {
        sql: format!(
            "SELECT {} {} WHERE v.id = $1",
            VEHICLE_SELECT_COLUMNS, VEHICLE_JOINS
        ),
        params: vec![SqlValue::Int(id)],
    }
}
