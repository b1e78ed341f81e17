use serde::{Deserialize, Serialize};

use crate::models::{SearchFilter, Vehicle};
use crate::repositories::VehiclePage;

// Query del listado: valores no numéricos se tratan como ausentes
#[derive(Debug, Default, Deserialize)]
pub struct ListVehiclesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

// Response de listado paginado
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<Vehicle>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// Response de búsqueda: incluye el filtro aplicado
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleSearchResponse {
    pub vehicles: Vec<Vehicle>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub filters: SearchFilter,
}

impl From<VehiclePage> for VehicleListResponse {
    fn from(page: VehiclePage) -> Self {
        Self {
            vehicles: page.vehicles,
            total: page.total,
            page: page.pagination.page,
            limit: page.pagination.limit,
        }
    }
}

impl VehicleSearchResponse {
    pub fn new(page: VehiclePage, filters: SearchFilter) -> Self {
        Self {
            vehicles: page.vehicles,
            total: page.total,
            page: page.pagination.page,
            limit: page.pagination.limit,
            filters,
        }
    }
}
