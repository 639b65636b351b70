use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{AvailabilityQuery, VehicleScheduleCheck};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilter};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::models::vehicle::Vehicle;
use crate::repositories::reservation_repository::BlockingRange;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_mobil_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mobil))
        .route("/", post(create_mobil))
        .route("/rekomendasi", get(rekomendasi_mobil))
        .route("/:id", get(get_mobil))
        .route("/:id", put(update_mobil))
        .route("/:id", delete(delete_mobil))
        .route("/:id/tanggal-terblokir", get(tanggal_terblokir))
        .route("/:id/cek-jadwal", get(cek_jadwal))
}

#[derive(Debug, Deserialize)]
struct RekomendasiQuery {
    limit: Option<i64>,
}

// Katalog publik: pengunjung hanya melihat unit aktif
async fn list_mobil(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let is_admin = user.map(|u| u.role.is_admin()).unwrap_or(false);
    let controller = VehicleController::new(&state);
    let vehicles = controller.list(filter, is_admin).await?;
    Ok(Json(vehicles))
}

async fn rekomendasi_mobil(
    State(state): State<AppState>,
    Query(query): Query<RekomendasiQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let vehicles = controller.rekomendasi(query.limit.unwrap_or(6)).await?;
    Ok(Json(vehicles))
}

async fn get_mobil(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    let vehicle = controller.get_by_id(id).await?;
    Ok(Json(vehicle))
}

// Kalender ketersediaan satu unit (publik, untuk form booking)
async fn tanggal_terblokir(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BlockingRange>>, AppError> {
    let controller = ReservationController::new(&state);
    let ranges = controller.unavailable_dates(id).await?;
    Ok(Json(ranges))
}

// Cek cepat: apakah unit ini kosong untuk rentang tanggal
async fn cek_jadwal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<VehicleScheduleCheck>, AppError> {
    let controller = ReservationController::new(&state);
    let check = controller.check_vehicle(id, query).await?;
    Ok(Json(check))
}

async fn create_mobil(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    user.require_admin()?;
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_mobil(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    user.require_admin()?;
    let controller = VehicleController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_mobil(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.require_admin()?;
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Mobil berhasil dihapus."
    })))
}
