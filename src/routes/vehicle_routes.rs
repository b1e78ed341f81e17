use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::{parse_search_params, VehicleController};
use crate::dto::vehicle_dto::{ListVehiclesQuery, VehicleListResponse, VehicleSearchResponse};
use crate::models::{Brand, FuelType, SearchFilter, Transmission, Vehicle, VehicleType};
use crate::services::FilterVocabulary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/search", get(search_vehicles).post(search_vehicles_json))
        .route("/vehicles/:id", get(get_vehicle))
        .route("/brands", get(list_brands))
        .route("/vehicle-types", get(list_vehicle_types))
        .route("/fuel-types", get(list_fuel_types))
        .route("/transmissions", get(list_transmissions))
        .route("/filters", get(get_filters))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.vehicle_service.clone())
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let response = controller(&state).list(query).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vehicle>, AppError> {
    let response = controller(&state).get_by_id(&id).await?;
    Ok(Json(response))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<VehicleSearchResponse>, AppError> {
    let filter = parse_search_params(&params);
    let response = controller(&state).search(filter).await?;
    Ok(Json(response))
}

async fn search_vehicles_json(
    State(state): State<AppState>,
    Json(filter): Json<SearchFilter>,
) -> Result<Json<VehicleSearchResponse>, AppError> {
    let response = controller(&state).search(filter).await?;
    Ok(Json(response))
}

async fn get_filters(State(state): State<AppState>) -> Result<Json<FilterVocabulary>, AppError> {
    let response = controller(&state).filters().await?;
    Ok(Json(response))
}

async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<Brand>>, AppError> {
    let response = controller(&state).brands().await?;
    Ok(Json(response))
}

async fn list_vehicle_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleType>>, AppError> {
    let response = controller(&state).vehicle_types().await?;
    Ok(Json(response))
}

async fn list_fuel_types(State(state): State<AppState>) -> Result<Json<Vec<FuelType>>, AppError> {
    let response = controller(&state).fuel_types().await?;
    Ok(Json(response))
}

async fn list_transmissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transmission>>, AppError> {
    let response = controller(&state).transmissions().await?;
    Ok(Json(response))
}
