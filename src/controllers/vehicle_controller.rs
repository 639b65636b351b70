use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilter};
use crate::models::vehicle::{TransmissionKind, Vehicle, VehiclePopularity, VehicleStatus};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::storage_service::{decode_base64_image, BlobStore, HttpBlobStore};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
    storage: Arc<dyn BlobStore>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.pool.clone()),
            storage: Arc::new(HttpBlobStore::new(
                state.http_client.clone(),
                state.config.blob_store_url.clone(),
            )),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let gambar_url = self.upload_gambar(request.gambar_base64.as_deref()).await?;

        let vehicle = self
            .repository
            .create(
                request.nama_mobil,
                request.merk,
                request.jenis,
                request.plat_nomor,
                request.tahun,
                request.transmisi.unwrap_or(TransmissionKind::Manual),
                request.kapasitas_kursi.unwrap_or(4),
                request.dengan_supir.unwrap_or(false),
                request.harga_per_hari,
                request.denda_per_jam.unwrap_or_default(),
                request.popularity.unwrap_or(VehiclePopularity::Standard),
                gambar_url,
                request.keterangan,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Mobil berhasil ditambahkan.".to_string(),
        ))
    }

    /// Katalog publik selalu dibatasi ke mobil aktif; admin bebas memfilter
    pub async fn list(&self, mut filter: VehicleFilter, is_admin: bool) -> AppResult<Vec<Vehicle>> {
        if !is_admin {
            filter.status = Some(VehicleStatus::Aktif);
        }
        self.repository.list(&filter).await
    }

    pub async fn rekomendasi(&self, limit: i64) -> AppResult<Vec<Vehicle>> {
        self.repository.rekomendasi(limit.clamp(1, 20)).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mobil tidak ditemukan.".to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        let gambar_url = self.upload_gambar(request.gambar_base64.as_deref()).await?;

        let vehicle = self
            .repository
            .update(
                id,
                request.nama_mobil,
                request.merk,
                request.plat_nomor,
                request.harga_per_hari,
                request.denda_per_jam,
                request.status,
                request.popularity,
                gambar_url,
                request.keterangan,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Mobil berhasil diperbarui.".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await
    }

    async fn upload_gambar(&self, gambar_base64: Option<&str>) -> AppResult<Option<String>> {
        match gambar_base64 {
            Some(data) => {
                let bytes = decode_base64_image(data)?;
                let path = format!("mobil/{}.jpg", Uuid::new_v4());
                Ok(Some(self.storage.store_file(bytes, &path).await?))
            }
            None => Ok(None),
        }
    }
}
