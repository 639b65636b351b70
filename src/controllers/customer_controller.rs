use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::customer_dto::CreateCustomerRequest;
use crate::middleware::auth::{AuthUser, Role};
use crate::models::customer::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::services::storage_service::{decode_base64_image, BlobStore, HttpBlobStore};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct CustomerController {
    repository: CustomerRepository,
    storage: Arc<dyn BlobStore>,
}

impl CustomerController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: CustomerRepository::new(state.pool.clone()),
            storage: Arc::new(HttpBlobStore::new(
                state.http_client.clone(),
                state.config.blob_store_url.clone(),
            )),
        }
    }

    /// Pelanggan login membuat profilnya sendiri; admin mencatat pelanggan
    /// walk-in tanpa akun (user_id kosong).
    pub async fn create(
        &self,
        actor: &AuthUser,
        request: CreateCustomerRequest,
    ) -> AppResult<ApiResponse<Customer>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user_id = match actor.role {
            Role::Admin => None,
            Role::Customer => {
                if self
                    .repository
                    .find_by_user_id(actor.user_id)
                    .await?
                    .is_some()
                {
                    return Err(AppError::Conflict {
                        message: "Profil pelanggan sudah terdaftar.".to_string(),
                        bentrok_mulai: None,
                        bentrok_selesai: None,
                    });
                }
                Some(actor.user_id)
            }
        };

        let foto_ktp_url = match request.foto_ktp_base64.as_deref() {
            Some(data) => {
                let bytes = decode_base64_image(data)?;
                let path = format!("ktp_uploads/{}.jpg", Uuid::new_v4());
                Some(self.storage.store_file(bytes, &path).await?)
            }
            None => None,
        };

        let customer = self
            .repository
            .create(
                user_id,
                request.nama,
                request.email,
                request.no_hp,
                request.alamat,
                request.ktp,
                foto_ktp_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            customer,
            "Profil pelanggan tersimpan.".to_string(),
        ))
    }

    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        self.repository.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Customer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pelanggan tidak ditemukan.".to_string()))
    }

    /// Profil milik user yang sedang login
    pub async fn me(&self, actor: &AuthUser) -> AppResult<Customer> {
        self.repository
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profil pelanggan belum terdaftar.".to_string()))
    }
}
