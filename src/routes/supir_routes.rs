use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::middleware::auth::AuthUser;
use crate::models::driver::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_supir_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_supir))
        .route("/", post(create_supir))
        .route("/:id", get(get_supir))
        .route("/:id", put(update_supir))
        .route("/:id", delete(delete_supir))
}

// Daftar supir tampil di form booking, jadi publik
async fn list_supir(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    let controller = DriverController::new(&state);
    let drivers = controller.list().await?;
    Ok(Json(drivers))
}

async fn get_supir(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(&state);
    let driver = controller.get_by_id(id).await?;
    Ok(Json(driver))
}

async fn create_supir(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    user.require_admin()?;
    let controller = DriverController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_supir(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    user.require_admin()?;
    let controller = DriverController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_supir(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.require_admin()?;
    let controller = DriverController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Supir berhasil dihapus."
    })))
}
