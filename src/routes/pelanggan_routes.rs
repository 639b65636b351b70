use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::common::ApiResponse;
use crate::dto::customer_dto::CreateCustomerRequest;
use crate::middleware::auth::AuthUser;
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pelanggan_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pelanggan))
        .route("/", post(create_pelanggan))
        .route("/saya", get(profil_saya))
        .route("/:id", get(get_pelanggan))
}

async fn create_pelanggan(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_pelanggan(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Customer>>, AppError> {
    user.require_admin()?;
    let controller = CustomerController::new(&state);
    let customers = controller.list().await?;
    Ok(Json(customers))
}

async fn profil_saya(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Customer>, AppError> {
    let controller = CustomerController::new(&state);
    let customer = controller.me(&user).await?;
    Ok(Json(customer))
}

async fn get_pelanggan(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    user.require_admin()?;
    let controller = CustomerController::new(&state);
    let customer = controller.get_by_id(id).await?;
    Ok(Json(customer))
}
