use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::promo_controller::PromoController;
use crate::dto::common::ApiResponse;
use crate::dto::promo_dto::{CekKodeQuery, CekKodeResponse, CreatePromoRequest, UpdatePromoRequest};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::models::promo::Promo;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_promo_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_promo))
        .route("/", post(create_promo))
        .route("/cek-kode", get(cek_kode))
        .route("/:id", get(get_promo))
        .route("/:id", put(update_promo))
        .route("/:id", delete(delete_promo))
}

// Publik melihat promo yang masih berlaku, admin melihat semua
async fn list_promo(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Json<Vec<Promo>>, AppError> {
    let is_admin = user.map(|u| u.role.is_admin()).unwrap_or(false);
    let controller = PromoController::new(&state);
    let promos = controller.list(is_admin).await?;
    Ok(Json(promos))
}

// Validasi kode promo dari form checkout, tanpa menukar kuota
async fn cek_kode(
    State(state): State<AppState>,
    Query(query): Query<CekKodeQuery>,
) -> Result<Json<CekKodeResponse>, AppError> {
    let controller = PromoController::new(&state);
    let response = controller.cek_kode(query).await?;
    Ok(Json(response))
}

async fn get_promo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Promo>, AppError> {
    user.require_admin()?;
    let controller = PromoController::new(&state);
    let promo = controller.get_by_id(id).await?;
    Ok(Json(promo))
}

async fn create_promo(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreatePromoRequest>,
) -> Result<Json<ApiResponse<Promo>>, AppError> {
    user.require_admin()?;
    let controller = PromoController::new(&state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_promo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePromoRequest>,
) -> Result<Json<ApiResponse<Promo>>, AppError> {
    user.require_admin()?;
    let controller = PromoController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_promo(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    user.require_admin()?;
    let controller = PromoController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Promo berhasil dihapus."
    })))
}
