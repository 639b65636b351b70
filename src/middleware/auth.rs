//! Autentikasi via JWT dari layanan auth eksternal
//!
//! Identitas diterbitkan di luar sistem ini; kita hanya membaca klaim
//! "siapa user ini dan apa perannya" dari bearer token. Peran dipetakan
//! ke enum [`Role`] supaya pengecekan hak akses selalu exhaustive.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Peran user dari layanan auth eksternal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Customer => false,
        }
    }
}

/// Claims JWT yang diterbitkan layanan auth
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

/// User terautentikasi yang diinjeksikan ke handler
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Pastikan user adalah admin/staff
    pub fn require_admin(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Customer => Err(AppError::Forbidden(
                "Aksi ini hanya untuk admin.".to_string(),
            )),
        }
    }
}

fn decode_bearer(parts: &Parts, secret: &str) -> Result<AuthUser, AppError> {
    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|auth| auth.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token autorisasi diperlukan".to_string()))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token tidak valid".to_string()))?;

    let user_id = Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Unauthorized("ID user tidak valid".to_string()))?;

    Ok(AuthUser {
        user_id,
        role: token_data.claims.role,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        decode_bearer(parts, &state.config.jwt_secret)
    }
}

/// Extractor opsional untuk route publik yang membedakan tampilan
/// admin vs pengunjung (katalog mobil, daftar promo).
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Token rusak diperlakukan sama dengan tanpa token: lihat versi publik
        Ok(MaybeAuthUser(
            decode_bearer(parts, &state.config.jwt_secret).ok(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_exhaustive() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Customer.is_admin());
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let customer = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Customer,
        };
        assert!(admin.require_admin().is_ok());
        assert!(customer.require_admin().is_err());
    }
}
