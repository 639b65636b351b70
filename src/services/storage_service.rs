//! Kolaborator blob store
//!
//! Upload bukti bayar dan foto KTP ke layanan penyimpanan eksternal.
//! Core hanya menyimpan URL yang dikembalikan sebagai string opaque.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;

use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Simpan bytes, kembalikan URL publik
    async fn store_file(&self, bytes: Vec<u8>, path_hint: &str) -> AppResult<String>;
}

/// Blob store via HTTP PUT
pub struct HttpBlobStore {
    client: Client,
    base_url: Option<String>,
}

impl HttpBlobStore {
    pub fn new(client: Client, base_url: Option<String>) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn store_file(&self, bytes: Vec<u8>, path_hint: &str) -> AppResult<String> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("BLOB_STORE_URL belum diset".to_string()))?;

        let url = format!("{}/{}", base.trim_end_matches('/'), path_hint);

        let response = self
            .client
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Gagal upload file: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Blob store menjawab {}",
                response.status()
            )));
        }

        Ok(url)
    }
}

/// Decode payload gambar base64 (menerima bentuk data-URL maupun polos)
pub fn decode_base64_image(data: &str) -> AppResult<Vec<u8>> {
    let raw = match data.split_once(";base64,") {
        Some((_, isi)) => isi,
        None => data,
    };

    base64::engine::general_purpose::STANDARD
        .decode(raw.trim())
        .map_err(|_| AppError::Validation("Data gambar base64 tidak valid.".to_string()))
}

/// Path upload bukti bayar: satu file per kode booking
pub fn bukti_bayar_path(kode_booking: &str) -> String {
    let clean: String = kode_booking.chars().filter(|c| c.is_alphanumeric()).collect();
    format!("bukti_bayar/{}.jpg", clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_base64() {
        let bytes = decode_base64_image("aGFsbw==").unwrap();
        assert_eq!(bytes, b"halo");
    }

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_base64_image("data:image/jpeg;base64,aGFsbw==").unwrap();
        assert_eq!(bytes, b"halo");
    }

    #[test]
    fn test_decode_invalid_rejected() {
        assert!(decode_base64_image("bukan base64!!!").is_err());
    }

    #[test]
    fn test_bukti_bayar_path_sanitized() {
        assert_eq!(bukti_bayar_path("TRX-AB12CD"), "bukti_bayar/TRXAB12CD.jpg");
    }
}
