//! Filtros de búsqueda, ordenamiento y paginación
//!
//! `SearchFilter` es la especificación transitoria de una consulta: nunca se
//! persiste. Sus nombres de campo y valores por defecto forman parte del
//! contrato público.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;
/// Caracteres de la búsqueda de texto que llegan a la consulta
pub const MAX_QUERY_CHARS: usize = 200;

/// Filtro de búsqueda de vehículos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchFilter {
    pub brand_ids: Vec<i32>,
    pub type_ids: Vec<i32>,
    pub fuel_type_ids: Vec<i32>,
    pub transmission_ids: Vec<i32>,
    pub price_min: Decimal,
    pub price_max: Decimal,
    pub year_min: i32,
    pub year_max: i32,
    pub doors_min: i32,
    pub seats_min: i32,
    pub fuel_economy_min: f64,
    /// Búsqueda de texto libre sobre modelo + descripción
    pub query: String,
    /// price_asc, price_desc, year_desc, fuel_economy_desc; cualquier otro valor = más recientes
    pub sort_by: String,
    pub page: i64,
    pub limit: i64,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            brand_ids: Vec::new(),
            type_ids: Vec::new(),
            fuel_type_ids: Vec::new(),
            transmission_ids: Vec::new(),
            price_min: Decimal::ZERO,
            price_max: Decimal::ZERO,
            year_min: 0,
            year_max: 0,
            doors_min: 0,
            seats_min: 0,
            fuel_economy_min: 0.0,
            query: String::new(),
            sort_by: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchFilter {
    /// Filtro vacío (sin predicados) con la paginación dada
    pub fn unfiltered(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        SortOrder::parse(&self.sort_by)
    }

    /// Texto de búsqueda recortado, `None` si queda vacío
    pub fn text_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.chars().take(MAX_QUERY_CHARS).collect())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::normalize(self.page, self.limit)
    }
}

/// Orden del listado. Cualquier clave desconocida cae en `Newest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    YearDesc,
    FuelEconomyDesc,
    #[default]
    Newest,
}

impl SortOrder {
    pub fn parse(key: &str) -> Self {
        match key.trim() {
            "price_asc" => SortOrder::PriceAsc,
            "price_desc" => SortOrder::PriceDesc,
            "year_desc" => SortOrder::YearDesc,
            "fuel_economy_desc" => SortOrder::FuelEconomyDesc,
            _ => SortOrder::Newest,
        }
    }

    /// Expresión ORDER BY (texto fijo, nunca proviene del filtro)
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "v.price ASC",
            SortOrder::PriceDesc => "v.price DESC",
            SortOrder::YearDesc => "v.year DESC",
            SortOrder::FuelEconomyDesc => "v.fuel_economy DESC",
            SortOrder::Newest => "v.created_at DESC",
        }
    }
}

/// Paginación normalizada: `page >= 1`, `limit` en `[1, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Normalización idempotente usada por listado y búsqueda
    pub fn normalize(page: i64, limit: i64) -> Self {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let limit = if (1..=MAX_LIMIT).contains(&limit) {
            limit
        } else {
            DEFAULT_LIMIT
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normalize() {
        assert_eq!(Pagination::normalize(0, 10), Pagination { page: 1, limit: 10 });
        assert_eq!(Pagination::normalize(-4, 10).page, 1);
        assert_eq!(Pagination::normalize(3, 0).limit, 20);
        assert_eq!(Pagination::normalize(3, -1).limit, 20);
        assert_eq!(Pagination::normalize(3, 101).limit, 20);
        assert_eq!(Pagination::normalize(3, 100).limit, 100);
        assert_eq!(Pagination::normalize(3, 1).limit, 1);
    }

    #[test]
    fn test_pagination_normalize_is_idempotent() {
        for (page, limit) in [(0, 0), (-1, 500), (7, 15), (1, 100)] {
            let once = Pagination::normalize(page, limit);
            let twice = Pagination::normalize(once.page, once.limit);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::normalize(1, 20).offset(), 0);
        assert_eq!(Pagination::normalize(3, 25).offset(), 50);
    }

    #[test]
    fn test_sort_order_fallback() {
        assert_eq!(SortOrder::parse("price_asc"), SortOrder::PriceAsc);
        assert_eq!(SortOrder::parse("fuel_economy_desc"), SortOrder::FuelEconomyDesc);
        assert_eq!(SortOrder::parse(""), SortOrder::Newest);
        assert_eq!(SortOrder::parse("price; DROP TABLE vehicles"), SortOrder::Newest);
        assert_eq!(SortOrder::Newest.as_sql(), "v.created_at DESC");
    }

    #[test]
    fn test_filter_defaults_from_empty_json() {
        let filter: SearchFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter, SearchFilter::default());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.sort_order(), SortOrder::Newest);
    }

    #[test]
    fn test_filter_accepts_numeric_price() {
        let filter: SearchFilter =
            serde_json::from_str(r#"{"brand_ids":[3,7],"price_min":150000,"sort_by":"price_asc"}"#)
                .unwrap();
        assert_eq!(filter.brand_ids, vec![3, 7]);
        assert_eq!(filter.price_min, Decimal::from(150000));
        assert_eq!(filter.sort_order(), SortOrder::PriceAsc);
    }

    #[test]
    fn test_text_query_is_trimmed_and_truncated() {
        let long = SearchFilter {
            query: format!("  {}  ", "ñ".repeat(250)),
            ..SearchFilter::default()
        };
        assert_eq!(long.text_query(), Some("ñ".repeat(MAX_QUERY_CHARS)));

        let blank = SearchFilter {
            query: "   ".to_string(),
            ..SearchFilter::default()
        };
        assert_eq!(blank.text_query(), None);
    }
}
