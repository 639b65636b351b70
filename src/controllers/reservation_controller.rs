use chrono::Utc;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{
    AdminCreateReservationRequest, AvailabilityQuery, CompleteReservationRequest,
    CompleteReservationResponse, CreateReservationRequest, ReservationResponse, SweepResponse,
    VehicleScheduleCheck,
};
use crate::middleware::auth::AuthUser;
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::models::vehicle::Vehicle;
use crate::repositories::reservation_repository::{BlockingRange, BookedResource};
use crate::services::availability_service;
use crate::services::pricing_service;
use crate::services::reservation_service::ReservationService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct ReservationController {
    service: ReservationService,
}

impl ReservationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: ReservationService::new(state),
        }
    }

    pub async fn create_online(
        &self,
        user: &AuthUser,
        request: CreateReservationRequest,
    ) -> AppResult<ApiResponse<ReservationResponse>> {
        let reservation = self.service.create_online(user.user_id, request).await?;
        let response = self.service.to_response(reservation).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Pesanan berhasil dibuat, menunggu konfirmasi admin.".to_string(),
        ))
    }

    pub async fn create_offline(
        &self,
        request: AdminCreateReservationRequest,
    ) -> AppResult<ApiResponse<ReservationResponse>> {
        let reservation = self
            .service
            .create_offline(request.customer_id, request.booking)
            .await?;
        let response = self.service.to_response(reservation).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Pesanan walk-in berhasil dicatat.".to_string(),
        ))
    }

    pub async fn list(&self, status: Option<ReservationStatus>) -> AppResult<Vec<Reservation>> {
        self.service.list(status).await
    }

    pub async fn list_mine(&self, user: &AuthUser) -> AppResult<Vec<Reservation>> {
        self.service.list_mine(user.user_id).await
    }

    pub async fn get(&self, id: Uuid, actor: &AuthUser) -> AppResult<ReservationResponse> {
        let reservation = self.service.get(id, actor).await?;
        self.service.to_response(reservation).await
    }

    pub async fn cancel(
        &self,
        id: Uuid,
        actor: &AuthUser,
    ) -> AppResult<ApiResponse<Reservation>> {
        let reservation = self.service.cancel(id, actor).await?;
        Ok(ApiResponse::success_with_message(
            reservation,
            "Pesanan dibatalkan.".to_string(),
        ))
    }

    pub async fn confirm(&self, id: Uuid) -> AppResult<ApiResponse<Reservation>> {
        let reservation = self.service.confirm(id).await?;
        Ok(ApiResponse::success_with_message(
            reservation,
            "Pesanan dikonfirmasi.".to_string(),
        ))
    }

    pub async fn activate(&self, id: Uuid) -> AppResult<ApiResponse<Reservation>> {
        let reservation = self.service.activate(id).await?;
        Ok(ApiResponse::success_with_message(
            reservation,
            "Unit diserahkan, pesanan aktif.".to_string(),
        ))
    }

    pub async fn complete(
        &self,
        id: Uuid,
        request: CompleteReservationRequest,
    ) -> AppResult<ApiResponse<CompleteReservationResponse>> {
        let (reservation, info) = self.service.complete(id, request.tanggal_kembali).await?;

        let message = match &info {
            Some(info) => format!("Pesanan selesai. {}", info),
            None => "Pesanan selesai.".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            CompleteReservationResponse {
                reservation,
                info_keterlambatan: info,
            },
            message,
        ))
    }

    /// Mobil yang masih kosong untuk rentang tanggal yang diminta
    pub async fn check_availability(&self, query: AvailabilityQuery) -> AppResult<Vec<Vehicle>> {
        // Validasi urutan tanggal sekaligus
        pricing_service::rental_days(query.tanggal_mulai, query.tanggal_selesai)?;

        self.service
            .repository()
            .available_vehicles(
                query.tanggal_mulai,
                query.tanggal_selesai,
                Utc::now().date_naive(),
            )
            .await
    }

    /// Cek cepat satu mobil untuk rentang tanggal (form booking frontend)
    pub async fn check_vehicle(
        &self,
        vehicle_id: Uuid,
        query: AvailabilityQuery,
    ) -> AppResult<VehicleScheduleCheck> {
        pricing_service::rental_days(query.tanggal_mulai, query.tanggal_selesai)?;

        let bentrok = availability_service::find_conflict(
            self.service.repository(),
            BookedResource::Vehicle,
            vehicle_id,
            query.tanggal_mulai,
            query.tanggal_selesai,
            None,
        )
        .await?;

        Ok(VehicleScheduleCheck {
            tersedia: bentrok.is_none(),
            bentrok,
        })
    }

    /// Tanggal terblokir satu mobil untuk kalender frontend
    pub async fn unavailable_dates(&self, vehicle_id: Uuid) -> AppResult<Vec<BlockingRange>> {
        self.service
            .repository()
            .unavailable_dates(vehicle_id, Utc::now().date_naive())
            .await
    }

    pub async fn mark_wa_sent(&self, id: Uuid) -> AppResult<ApiResponse<Reservation>> {
        let reservation = self.service.mark_wa_sent(id).await?;
        Ok(ApiResponse::success_with_message(
            reservation,
            "Notifikasi WA ditandai terkirim.".to_string(),
        ))
    }

    /// Jalankan sweep manual dari dashboard admin
    pub async fn sweep(&self) -> AppResult<ApiResponse<SweepResponse>> {
        let dibatalkan = self.service.sweep_expired().await?;
        Ok(ApiResponse::success_with_message(
            SweepResponse { dibatalkan },
            format!("{} pesanan kedaluwarsa dibatalkan.", dibatalkan),
        ))
    }
}
