use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{
    AdminCreateReservationRequest, AvailabilityQuery, CompleteReservationRequest,
    CompleteReservationResponse, CreateReservationRequest, ReservationListQuery,
    ReservationResponse, SweepResponse,
};
use crate::middleware::auth::AuthUser;
use crate::models::reservation::Reservation;
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pesanan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pesanan))
        .route("/", post(create_pesanan))
        .route("/offline", post(create_pesanan_offline))
        .route("/saya", get(list_pesanan_saya))
        .route("/cek-ketersediaan", get(cek_ketersediaan))
        .route("/sweep", post(sweep_pesanan))
        .route("/:id", get(get_pesanan))
        .route("/:id/batal", post(batalkan_pesanan))
        .route("/:id/konfirmasi", post(konfirmasi_pesanan))
        .route("/:id/aktifkan", post(aktifkan_pesanan))
        .route("/:id/selesai", post(selesaikan_pesanan))
        .route("/:id/wa-terkirim", post(tandai_wa_terkirim))
}

// Booking online oleh pelanggan yang login
async fn create_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(&state);
    let response = controller.create_online(&user, request).await?;
    Ok(Json(response))
}

// Booking walk-in yang dicatat admin
async fn create_pesanan_offline(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<AdminCreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let response = controller.create_offline(request).await?;
    Ok(Json(response))
}

async fn list_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let reservations = controller.list(query.status).await?;
    Ok(Json(reservations))
}

async fn list_pesanan_saya(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let controller = ReservationController::new(&state);
    let reservations = controller.list_mine(&user).await?;
    Ok(Json(reservations))
}

// Publik: mobil yang masih kosong untuk rentang tanggal
async fn cek_ketersediaan(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = ReservationController::new(&state);
    let vehicles = controller.check_availability(query).await?;
    Ok(Json(vehicles))
}

async fn get_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, AppError> {
    let controller = ReservationController::new(&state);
    let response = controller.get(id, &user).await?;
    Ok(Json(response))
}

async fn batalkan_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = ReservationController::new(&state);
    let response = controller.cancel(id, &user).await?;
    Ok(Json(response))
}

async fn konfirmasi_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let response = controller.confirm(id).await?;
    Ok(Json(response))
}

async fn aktifkan_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let response = controller.activate(id).await?;
    Ok(Json(response))
}

async fn selesaikan_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteReservationRequest>,
) -> Result<Json<ApiResponse<CompleteReservationResponse>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let response = controller.complete(id, request).await?;
    Ok(Json(response))
}

// Admin menandai link WA konfirmasi sudah dikirim
async fn tandai_wa_terkirim(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let response = controller.mark_wa_sent(id).await?;
    Ok(Json(response))
}

// Sweep manual dari dashboard (task periodik juga jalan di background)
async fn sweep_pesanan(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<SweepResponse>>, AppError> {
    user.require_admin()?;
    let controller = ReservationController::new(&state);
    let response = controller.sweep().await?;
    Ok(Json(response))
}
