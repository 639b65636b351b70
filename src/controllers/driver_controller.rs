use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::driver::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::services::storage_service::{decode_base64_image, BlobStore, HttpBlobStore};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct DriverController {
    repository: DriverRepository,
    storage: Arc<dyn BlobStore>,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: DriverRepository::new(state.pool.clone()),
            storage: Arc::new(HttpBlobStore::new(
                state.http_client.clone(),
                state.config.blob_store_url.clone(),
            )),
        }
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<ApiResponse<Driver>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let foto_url = self.upload_foto(request.foto_base64.as_deref()).await?;

        let driver = self
            .repository
            .create(
                request.nama,
                request.no_hp,
                request.harga_per_hari.unwrap_or_default(),
                foto_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Supir berhasil ditambahkan.".to_string(),
        ))
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Driver> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Supir tidak ditemukan.".to_string()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> AppResult<ApiResponse<Driver>> {
        let foto_url = self.upload_foto(request.foto_base64.as_deref()).await?;

        let driver = self
            .repository
            .update(
                id,
                request.nama,
                request.no_hp,
                request.harga_per_hari,
                request.status,
                foto_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Supir berhasil diperbarui.".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await
    }

    async fn upload_foto(&self, foto_base64: Option<&str>) -> AppResult<Option<String>> {
        match foto_base64 {
            Some(data) => {
                let bytes = decode_base64_image(data)?;
                let path = format!("supir/{}.jpg", Uuid::new_v4());
                Ok(Some(self.storage.store_file(bytes, &path).await?))
            }
            None => Ok(None),
        }
    }
}
