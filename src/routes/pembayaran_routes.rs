use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{CreatePaymentRequest, PaymentListQuery, RejectPaymentRequest};
use crate::middleware::auth::AuthUser;
use crate::models::payment::Payment;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pembayaran_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pembayaran))
        .route("/", post(submit_bukti))
        .route("/catat", post(catat_pembayaran))
        .route("/saya", get(list_pembayaran_saya))
        .route("/:id", get(get_pembayaran))
        .route("/:id/verifikasi", post(verifikasi_pembayaran))
        .route("/:id/tolak", post(tolak_pembayaran))
}

// Pelanggan upload bukti transfer
async fn submit_bukti(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    let controller = PaymentController::new(&state);
    let response = controller.submit_proof(&user, request).await?;
    Ok(Json(response))
}

// Admin mencatat pembayaran cash/transfer yang sudah dicek manual
async fn catat_pembayaran(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    user.require_admin()?;
    let controller = PaymentController::new(&state);
    let response = controller.record_by_admin(&user, request).await?;
    Ok(Json(response))
}

async fn list_pembayaran(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<Vec<Payment>>, AppError> {
    user.require_admin()?;
    let controller = PaymentController::new(&state);
    let payments = controller.list(query.status).await?;
    Ok(Json(payments))
}

async fn list_pembayaran_saya(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Payment>>, AppError> {
    let controller = PaymentController::new(&state);
    let payments = controller.list_mine(&user).await?;
    Ok(Json(payments))
}

async fn get_pembayaran(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    user.require_admin()?;
    let controller = PaymentController::new(&state);
    let payment = controller.get(id).await?;
    Ok(Json(payment))
}

async fn verifikasi_pembayaran(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    user.require_admin()?;
    let controller = PaymentController::new(&state);
    let response = controller.verify(&user, id).await?;
    Ok(Json(response))
}

async fn tolak_pembayaran(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectPaymentRequest>,
) -> Result<Json<ApiResponse<Payment>>, AppError> {
    user.require_admin()?;
    let controller = PaymentController::new(&state);
    let response = controller.reject(&user, id, request).await?;
    Ok(Json(response))
}
