//! Sistem penanganan error
//!
//! Semua tipe error aplikasi dan konversinya ke response HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

use crate::models::promo::PromoReason;

/// Error utama aplikasi
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Bentrok jadwal: bawa rentang tanggal pesanan yang memblokir supaya
    /// frontend bisa menawarkan tanggal alternatif.
    #[error("{message}")]
    Conflict {
        message: String,
        bentrok_mulai: Option<NaiveDate>,
        bentrok_selesai: Option<NaiveDate>,
    },

    #[error("{message}")]
    Promo { reason: PromoReason, message: String },

    /// Transisi state machine yang tidak sah; bawa status sekarang.
    #[error("{message}")]
    InvalidState { current: String, message: String },

    #[error("Bukti pembayaran wajib diunggah untuk metode transfer")]
    MissingProof,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Response error untuk API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(msg) => {
                log::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": msg })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: msg,
                    details: None,
                    code: Some("VALIDATION_ERROR".to_string()),
                },
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: "Unauthorized".to_string(),
                    message: msg,
                    details: None,
                    code: Some("UNAUTHORIZED".to_string()),
                },
            ),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: "Forbidden".to_string(),
                    message: msg,
                    details: None,
                    code: Some("FORBIDDEN".to_string()),
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                },
            ),

            AppError::Conflict {
                message,
                bentrok_mulai,
                bentrok_selesai,
            } => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message,
                    details: match (bentrok_mulai, bentrok_selesai) {
                        (Some(mulai), Some(selesai)) => Some(json!({
                            "bentrok_mulai": mulai.to_string(),
                            "bentrok_selesai": selesai.to_string(),
                        })),
                        _ => None,
                    },
                    code: Some("CONFLICT".to_string()),
                },
            ),

            AppError::Promo { reason, message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Promo Error".to_string(),
                    message,
                    details: Some(json!({ "reason": reason.as_str() })),
                    code: Some("PROMO_ERROR".to_string()),
                },
            ),

            AppError::InvalidState { current, message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid State".to_string(),
                    message,
                    details: Some(json!({ "status": current })),
                    code: Some("INVALID_STATE".to_string()),
                },
            ),

            AppError::MissingProof => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Missing Proof".to_string(),
                    message: "Bukti pembayaran wajib diunggah untuk metode transfer".to_string(),
                    details: None,
                    code: Some("MISSING_PROOF".to_string()),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                },
            ),

            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }

            AppError::ExternalApi(msg) => {
                log::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "An error occurred while communicating with external service"
                            .to_string(),
                        details: Some(json!({ "external_api_error": msg })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Exclusion constraint (23P01) = dua request berebut jadwal yang sama.
        // Pre-check aplikasi kalah cepat, constraint database yang menang.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23P01") {
                return AppError::Conflict {
                    message: "Jadwal bentrok dengan pesanan lain yang baru saja masuk.".to_string(),
                    bentrok_mulai: None,
                    bentrok_selesai: None,
                };
            }
        }
        AppError::Database(err.to_string())
    }
}

/// Cek apakah error sqlx adalah pelanggaran unique constraint tertentu
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(constraint);
    }
    false
}

/// Alias hasil untuk operasi yang bisa gagal
pub type AppResult<T> = Result<T, AppError>;
