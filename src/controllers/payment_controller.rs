use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{CreatePaymentRequest, RejectPaymentRequest};
use crate::middleware::auth::AuthUser;
use crate::models::payment::{Payment, PaymentStatus};
use crate::services::payment_service::PaymentService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct PaymentController {
    service: PaymentService,
}

impl PaymentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: PaymentService::new(state),
        }
    }

    pub async fn submit_proof(
        &self,
        user: &AuthUser,
        request: CreatePaymentRequest,
    ) -> AppResult<ApiResponse<Payment>> {
        let payment = self.service.submit_proof(user.user_id, request).await?;
        Ok(ApiResponse::success_with_message(
            payment,
            "Bukti pembayaran diterima, menunggu verifikasi admin.".to_string(),
        ))
    }

    pub async fn record_by_admin(
        &self,
        admin: &AuthUser,
        request: CreatePaymentRequest,
    ) -> AppResult<ApiResponse<Payment>> {
        let payment = self.service.record_by_admin(admin, request).await?;
        Ok(ApiResponse::success_with_message(
            payment,
            "Pembayaran dicatat lunas.".to_string(),
        ))
    }

    pub async fn verify(&self, admin: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Payment>> {
        let payment = self.service.verify(admin, id).await?;
        Ok(ApiResponse::success_with_message(
            payment,
            "Pembayaran diverifikasi lunas.".to_string(),
        ))
    }

    pub async fn reject(
        &self,
        admin: &AuthUser,
        id: Uuid,
        request: RejectPaymentRequest,
    ) -> AppResult<ApiResponse<Payment>> {
        let payment = self
            .service
            .reject(admin, id, request.catatan_admin)
            .await?;
        Ok(ApiResponse::success_with_message(
            payment,
            "Pembayaran ditolak, pelanggan bisa mengunggah ulang bukti.".to_string(),
        ))
    }

    pub async fn list(&self, status: Option<PaymentStatus>) -> AppResult<Vec<Payment>> {
        self.service.list(status).await
    }

    pub async fn list_mine(&self, user: &AuthUser) -> AppResult<Vec<Payment>> {
        self.service.list_mine(user.user_id).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Payment> {
        self.service.get(id).await
    }
}
