//! Siklus hidup pembayaran
//!
//! Pelanggan mengunggah bukti transfer (masuk pending), admin memverifikasi
//! atau menolak; admin juga bisa mencatat pembayaran cash yang langsung
//! lunas. Perubahan status pembayaran mendorong status pesanan lewat
//! `ReservationService::on_payment_verified` / `on_payment_rejected`.

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::payment_dto::CreatePaymentRequest;
use crate::middleware::auth::AuthUser;
use crate::models::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::models::reservation::Reservation;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::services::reservation_service::ReservationService;
use crate::services::storage_service::{
    bukti_bayar_path, decode_base64_image, BlobStore, HttpBlobStore,
};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct PaymentService {
    payments: PaymentRepository,
    reservations: ReservationRepository,
    customers: CustomerRepository,
    reservation_service: ReservationService,
    storage: Arc<dyn BlobStore>,
}

impl PaymentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            payments: PaymentRepository::new(state.pool.clone()),
            reservations: ReservationRepository::new(state.pool.clone()),
            customers: CustomerRepository::new(state.pool.clone()),
            reservation_service: ReservationService::new(state),
            storage: Arc::new(HttpBlobStore::new(
                state.http_client.clone(),
                state.config.blob_store_url.clone(),
            )),
        }
    }

    /// Pelanggan upload bukti transfer atas pesanannya sendiri. Metode
    /// dipaksa transfer, bukti wajib, status masuk pending menunggu
    /// verifikasi admin.
    pub async fn submit_proof(
        &self,
        user_id: Uuid,
        req: CreatePaymentRequest,
    ) -> AppResult<Payment> {
        let pesanan = self.must_find_reservation(req.reservation_id).await?;

        let customer = self
            .customers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Profil pelanggan belum terdaftar.".to_string())
            })?;

        if customer.id != pesanan.customer_id {
            return Err(AppError::Forbidden(
                "Pesanan ini bukan milik Anda.".to_string(),
            ));
        }

        if pesanan.status.is_terminal() {
            return Err(AppError::InvalidState {
                current: pesanan.status.as_str().to_string(),
                message: "Pesanan sudah selesai atau batal, pembayaran ditolak.".to_string(),
            });
        }

        // Precheck ramah; index partial di DB tetap penjaga terakhir
        if self.reservations.has_current_payment(pesanan.id).await? {
            return Err(AppError::Conflict {
                message: "Pesanan ini sudah punya pembayaran yang sedang berjalan.".to_string(),
                bentrok_mulai: None,
                bentrok_selesai: None,
            });
        }

        let bukti_url = self.resolve_proof(&pesanan, &req).await?;
        if bukti_url.is_none() {
            return Err(AppError::MissingProof);
        }

        let jumlah = req.jumlah.unwrap_or(pesanan.harga_total);
        self.validate_jumlah(jumlah)?;

        let payment = self
            .payments
            .create(
                pesanan.id,
                jumlah,
                PaymentMethod::Transfer,
                bukti_url,
                PaymentStatus::Pending,
                None,
                None,
            )
            .await?;

        log::info!(
            "💳 Bukti bayar {} masuk untuk pesanan {}",
            payment.id,
            pesanan.kode_booking
        );

        Ok(payment)
    }

    /// Admin mencatat pembayaran langsung (cash di loket atau transfer yang
    /// sudah dicek manual). Langsung lunas dan pesanan ikut terkonfirmasi.
    pub async fn record_by_admin(
        &self,
        admin: &AuthUser,
        req: CreatePaymentRequest,
    ) -> AppResult<Payment> {
        let pesanan = self.must_find_reservation(req.reservation_id).await?;

        if pesanan.status.is_terminal() {
            return Err(AppError::InvalidState {
                current: pesanan.status.as_str().to_string(),
                message: "Pesanan sudah selesai atau batal, pembayaran ditolak.".to_string(),
            });
        }

        let metode = req.metode.unwrap_or(PaymentMethod::Cash);

        let bukti_url = self.resolve_proof(&pesanan, &req).await?;
        if metode == PaymentMethod::Transfer && bukti_url.is_none() {
            return Err(AppError::MissingProof);
        }

        let jumlah = req.jumlah.unwrap_or(pesanan.harga_total);
        self.validate_jumlah(jumlah)?;

        let payment = self
            .payments
            .create(
                pesanan.id,
                jumlah,
                metode,
                bukti_url,
                PaymentStatus::Lunas,
                Some(admin.user_id),
                req.catatan_admin,
            )
            .await?;

        self.reservation_service
            .on_payment_verified(pesanan.id)
            .await?;

        Ok(payment)
    }

    /// Admin memverifikasi bukti transfer: pending -> lunas, pesanan naik
    /// ke konfirmasi.
    pub async fn verify(&self, admin: &AuthUser, payment_id: Uuid) -> AppResult<Payment> {
        let payment = self.must_find_payment(payment_id).await?;

        if payment.status != PaymentStatus::Pending {
            return Err(AppError::InvalidState {
                current: payment.status.as_str().to_string(),
                message: "Hanya pembayaran pending yang bisa diverifikasi.".to_string(),
            });
        }

        let updated = self
            .payments
            .update_status(payment_id, PaymentStatus::Lunas, Some(admin.user_id), None)
            .await?;

        self.reservation_service
            .on_payment_verified(updated.reservation_id)
            .await?;

        log::info!("✅ Pembayaran {} diverifikasi lunas", payment_id);
        Ok(updated)
    }

    /// Admin menolak bukti transfer: pending -> gagal. Konfirmasi pesanan
    /// yang bersandar pada pembayaran ini diturunkan kembali ke pending,
    /// dan pelanggan bisa upload ulang (index partial hanya menghitung
    /// pembayaran non-gagal).
    pub async fn reject(
        &self,
        admin: &AuthUser,
        payment_id: Uuid,
        catatan_admin: Option<String>,
    ) -> AppResult<Payment> {
        let payment = self.must_find_payment(payment_id).await?;

        if payment.status != PaymentStatus::Pending {
            return Err(AppError::InvalidState {
                current: payment.status.as_str().to_string(),
                message: "Hanya pembayaran pending yang bisa ditolak.".to_string(),
            });
        }

        let updated = self
            .payments
            .update_status(
                payment_id,
                PaymentStatus::Gagal,
                Some(admin.user_id),
                catatan_admin,
            )
            .await?;

        self.reservation_service
            .on_payment_rejected(updated.reservation_id)
            .await?;

        Ok(updated)
    }

    pub async fn list(&self, status: Option<PaymentStatus>) -> AppResult<Vec<Payment>> {
        self.payments.list_all(status).await
    }

    /// Pembayaran milik pelanggan yang sedang login
    pub async fn list_mine(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        let customer = self
            .customers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Profil pelanggan belum terdaftar.".to_string())
            })?;

        self.payments.list_by_customer(customer.id).await
    }

    pub async fn get(&self, payment_id: Uuid) -> AppResult<Payment> {
        self.must_find_payment(payment_id).await
    }

    /// Bukti bayar: base64 diunggah ke blob store, URL dipakai apa adanya
    async fn resolve_proof(
        &self,
        pesanan: &Reservation,
        req: &CreatePaymentRequest,
    ) -> AppResult<Option<String>> {
        if let Some(data) = req.bukti_bayar_base64.as_deref() {
            let bytes = decode_base64_image(data)?;
            let path = bukti_bayar_path(&pesanan.kode_booking);
            return Ok(Some(self.storage.store_file(bytes, &path).await?));
        }

        Ok(req.bukti_bayar_url.clone())
    }

    fn validate_jumlah(&self, jumlah: Decimal) -> AppResult<()> {
        if jumlah <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Jumlah pembayaran harus lebih dari nol.".to_string(),
            ));
        }
        Ok(())
    }

    async fn must_find_reservation(&self, id: Uuid) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pesanan tidak ditemukan.".to_string()))
    }

    async fn must_find_payment(&self, id: Uuid) -> AppResult<Payment> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pembayaran tidak ditemukan.".to_string()))
    }
}
