use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::promo_dto::{CekKodeQuery, CekKodeResponse, CreatePromoRequest, UpdatePromoRequest};
use crate::models::promo::{DiscountKind, Promo};
use crate::repositories::promo_repository::PromoRepository;
use crate::services::promo_service;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct PromoController {
    repository: PromoRepository,
}

impl PromoController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: PromoRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(&self, request: CreatePromoRequest) -> AppResult<ApiResponse<Promo>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if request.berlaku_sampai <= request.berlaku_mulai {
            return Err(AppError::Validation(
                "Tanggal berlaku sampai harus setelah berlaku mulai.".to_string(),
            ));
        }

        if request.tipe_diskon == DiscountKind::Persen
            && (request.nilai_diskon <= Decimal::ZERO || request.nilai_diskon > Decimal::from(100))
        {
            return Err(AppError::Validation(
                "Diskon persen harus di antara 0 dan 100.".to_string(),
            ));
        }

        if self
            .repository
            .find_by_kode(&request.kode)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict {
                message: "Kode promo sudah dipakai.".to_string(),
                bentrok_mulai: None,
                bentrok_selesai: None,
            });
        }

        let promo = self
            .repository
            .create(
                request.kode,
                request.nama_promo,
                request.keterangan,
                request.tipe_diskon,
                request.nilai_diskon,
                request.max_potongan.unwrap_or_default(),
                request.min_transaksi.unwrap_or_default(),
                request.kuota.unwrap_or(0),
                request.berlaku_mulai,
                request.berlaku_sampai,
                request.aktif.unwrap_or(true),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            promo,
            "Promo berhasil dibuat.".to_string(),
        ))
    }

    /// Admin melihat semua promo; publik hanya yang masih bisa ditukar
    pub async fn list(&self, is_admin: bool) -> AppResult<Vec<Promo>> {
        if is_admin {
            self.repository.list_all().await
        } else {
            self.repository.list_redeemable(Utc::now()).await
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Promo> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Promo tidak ditemukan.".to_string()))
    }

    /// Validasi kode di form checkout: tidak menukar kuota, hanya estimasi
    pub async fn cek_kode(&self, query: CekKodeQuery) -> AppResult<CekKodeResponse> {
        let promo = self
            .repository
            .find_by_kode(&query.kode)
            .await?
            .ok_or_else(|| AppError::NotFound("Kode promo tidak ditemukan.".to_string()))?;

        let total_awal = query.total_belanja.unwrap_or_default();
        let quote = promo_service::quote(&promo, total_awal, Utc::now());

        Ok(CekKodeResponse {
            is_valid: quote.ok,
            reason: quote.reason,
            estimasi_potongan: quote.potongan,
            total_awal,
            total_akhir: total_awal - quote.potongan,
            promo: quote.ok.then_some(promo),
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePromoRequest,
    ) -> AppResult<ApiResponse<Promo>> {
        let promo = self
            .repository
            .update(
                id,
                request.nama_promo,
                request.keterangan,
                request.nilai_diskon,
                request.max_potongan,
                request.min_transaksi,
                request.kuota,
                request.berlaku_mulai,
                request.berlaku_sampai,
                request.aktif,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            promo,
            "Promo berhasil diperbarui.".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await
    }
}
