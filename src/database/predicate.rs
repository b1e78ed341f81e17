//! Constructor de predicados parametrizados
//!
//! Traduce un `SearchFilter` en una conjunción de condiciones con parámetros
//! posicionales (`$1`, `$2`, ...). Los valores del filtro nunca se concatenan
//! al texto SQL: cada uno viaja como parámetro enlazado.

use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use crate::models::SearchFilter;

/// Configuración de búsqueda de texto de PostgreSQL
pub const TEXT_SEARCH_CONFIG: &str = "spanish";

/// Valor enlazable a una consulta
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    BigInt(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
}

impl SqlValue {
    fn add_to(&self, args: &mut PgArguments) {
        match self {
            SqlValue::Int(v) => args.add(*v),
            SqlValue::BigInt(v) => args.add(*v),
            SqlValue::Decimal(v) => args.add(*v),
            SqlValue::Float(v) => args.add(*v),
            SqlValue::Text(v) => args.add(v.clone()),
        }
    }
}

/// Convierte una secuencia de valores en argumentos de PostgreSQL
pub fn to_pg_arguments(params: &[SqlValue]) -> PgArguments {
    let mut args = PgArguments::default();
    for param in params {
        param.add_to(&mut args);
    }
    args
}

/// Fragmento de condición pendiente de numerar
#[derive(Debug, Clone)]
enum Condition {
    /// `column IN (...)`, un parámetro por valor
    In { column: &'static str, values: Vec<SqlValue> },
    /// `column op $n`
    Compare { column: &'static str, op: &'static str, value: SqlValue },
    /// Búsqueda de texto nativa sobre modelo + descripción
    TextSearch { value: SqlValue },
}

impl Condition {
    fn render(&self, slot: &mut usize, out: &mut Vec<SqlValue>) -> String {
        match self {
            Condition::In { column, values } => {
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|value| {
                        out.push(value.clone());
                        take_slot(slot)
                    })
                    .collect();
                format!("{} IN ({})", column, placeholders.join(","))
            }
            Condition::Compare { column, op, value } => {
                out.push(value.clone());
                format!("{} {} {}", column, op, take_slot(slot))
            }
            Condition::TextSearch { value } => {
                out.push(value.clone());
                format!(
                    "to_tsvector('{cfg}', v.model || ' ' || COALESCE(v.description, '')) @@ plainto_tsquery('{cfg}', {slot})",
                    cfg = TEXT_SEARCH_CONFIG,
                    slot = take_slot(slot),
                )
            }
        }
    }
}

fn take_slot(slot: &mut usize) -> String {
    let placeholder = format!("${}", slot);
    *slot += 1;
    placeholder
}

/// Resultado final: texto WHERE + parámetros en orden
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    /// Vacío cuando no hay ningún predicado (conjunto sin filtrar)
    pub sql: String,
    pub params: Vec<SqlValue>,
    /// Primer índice libre; la paginación continúa desde aquí
    pub next_slot: usize,
}

impl WhereClause {
    pub fn empty() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            next_slot: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Acumula condiciones y solo numera los parámetros al finalizar
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    conditions: Vec<Condition>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye el predicado completo de un filtro de búsqueda
    pub fn from_filter(filter: &SearchFilter) -> Self {
        let mut builder = Self::new();

        builder
            .ids_in("v.brand_id", &filter.brand_ids)
            .ids_in("v.type_id", &filter.type_ids)
            .ids_in("v.fuel_type_id", &filter.fuel_type_ids)
            .ids_in("v.transmission_id", &filter.transmission_ids);

        // Un límite solo cuenta si es > 0
        if filter.price_min > Decimal::ZERO {
            builder.compare("v.price", ">=", SqlValue::Decimal(filter.price_min));
        }
        if filter.price_max > Decimal::ZERO {
            builder.compare("v.price", "<=", SqlValue::Decimal(filter.price_max));
        }
        if filter.year_min > 0 {
            builder.compare("v.year", ">=", SqlValue::Int(filter.year_min));
        }
        if filter.year_max > 0 {
            builder.compare("v.year", "<=", SqlValue::Int(filter.year_max));
        }
        if filter.doors_min > 0 {
            builder.compare("v.doors", ">=", SqlValue::Int(filter.doors_min));
        }
        if filter.seats_min > 0 {
            builder.compare("v.seats", ">=", SqlValue::Int(filter.seats_min));
        }
        if filter.fuel_economy_min > 0.0 {
            builder.compare("v.fuel_economy", ">=", SqlValue::Float(filter.fuel_economy_min));
        }

        if let Some(query) = filter.text_query() {
            builder.text_search(&query);
        }

        builder
    }

    pub fn ids_in(&mut self, column: &'static str, ids: &[i32]) -> &mut Self {
        if !ids.is_empty() {
            self.conditions.push(Condition::In {
                column,
                values: ids.iter().copied().map(SqlValue::Int).collect(),
            });
        }
        self
    }

    pub fn compare(&mut self, column: &'static str, op: &'static str, value: SqlValue) -> &mut Self {
        self.conditions.push(Condition::Compare { column, op, value });
        self
    }

    pub fn text_search(&mut self, query: &str) -> &mut Self {
        self.conditions.push(Condition::TextSearch {
            value: SqlValue::Text(query.to_string()),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Numera los parámetros desde `$1` y une todo con AND
    pub fn finish(self) -> WhereClause {
        if self.conditions.is_empty() {
            return WhereClause::empty();
        }

        let mut slot = 1;
        let mut params = Vec::new();
        let fragments: Vec<String> = self
            .conditions
            .iter()
            .map(|condition| condition.render(&mut slot, &mut params))
            .collect();

        WhereClause {
            sql: format!("WHERE {}", fragments.join(" AND ")),
            params,
            next_slot: slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where() {
        let clause = PredicateBuilder::from_filter(&SearchFilter::default()).finish();
        assert!(clause.is_empty());
        assert!(clause.params.is_empty());
        assert_eq!(clause.next_slot, 1);
    }

    #[test]
    fn test_id_sets_consume_one_slot_per_id() {
        let filter = SearchFilter {
            brand_ids: vec![3, 7],
            transmission_ids: vec![2],
            ..SearchFilter::default()
        };
        let clause = PredicateBuilder::from_filter(&filter).finish();

        assert_eq!(
            clause.sql,
            "WHERE v.brand_id IN ($1,$2) AND v.transmission_id IN ($3)"
        );
        assert_eq!(
            clause.params,
            vec![SqlValue::Int(3), SqlValue::Int(7), SqlValue::Int(2)]
        );
        assert_eq!(clause.next_slot, 4);
    }

    #[test]
    fn test_scalar_bounds_in_order() {
        let filter = SearchFilter {
            price_min: Decimal::from(100_000),
            price_max: Decimal::from(500_000),
            year_min: 2020,
            year_max: 2024,
            doors_min: 4,
            fuel_economy_min: 15.5,
            ..SearchFilter::default()
        };
        let clause = PredicateBuilder::from_filter(&filter).finish();

        assert_eq!(
            clause.sql,
            "WHERE v.price >= $1 AND v.price <= $2 AND v.year >= $3 AND v.year <= $4 AND v.doors >= $5 AND v.fuel_economy >= $6"
        );
        assert_eq!(clause.params.len(), 6);
        assert_eq!(clause.params[3], SqlValue::Int(2024));
        assert_eq!(clause.params[5], SqlValue::Float(15.5));
    }

    #[test]
    fn test_zero_bounds_are_not_set() {
        let filter = SearchFilter {
            doors_min: 0,
            seats_min: 0,
            year_max: 0,
            price_min: Decimal::ZERO,
            fuel_economy_min: 0.0,
            ..SearchFilter::default()
        };
        assert!(PredicateBuilder::from_filter(&filter).is_empty());
    }

    #[test]
    fn test_text_search_is_bound_not_interpolated() {
        let filter = SearchFilter {
            brand_ids: vec![1],
            query: "x'); DROP TABLE vehicles; --".to_string(),
            ..SearchFilter::default()
        };
        let clause = PredicateBuilder::from_filter(&filter).finish();

        assert!(!clause.sql.contains("DROP"));
        assert!(clause.sql.ends_with("@@ plainto_tsquery('spanish', $2)"));
        assert_eq!(
            clause.params[1],
            SqlValue::Text("x'); DROP TABLE vehicles; --".to_string())
        );
    }

    #[test]
    fn test_long_query_is_truncated() {
        let filter = SearchFilter {
            query: "a".repeat(201),
            ..SearchFilter::default()
        };
        let clause = PredicateBuilder::from_filter(&filter).finish();

        assert_eq!(clause.params, vec![SqlValue::Text("a".repeat(200))]);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let filter = SearchFilter {
            query: "   ".to_string(),
            ..SearchFilter::default()
        };
        assert!(PredicateBuilder::from_filter(&filter).finish().is_empty());
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let filter = SearchFilter {
            brand_ids: vec![1, 2, 3],
            type_ids: vec![4],
            fuel_type_ids: vec![5, 6],
            seats_min: 7,
            query: "familiar".to_string(),
            ..SearchFilter::default()
        };
        let clause = PredicateBuilder::from_filter(&filter).finish();

        let placeholders = clause.sql.matches('$').count();
        assert_eq!(placeholders, clause.params.len());
        assert_eq!(clause.next_slot, clause.params.len() + 1);
        for n in 1..=clause.params.len() {
            assert!(clause.sql.contains(&format!("${}", n)));
        }
    }
}
