//! Model Pelanggan
//!
//! Profil penyewa. `user_id` menunjuk subject di layanan auth eksternal;
//! pelanggan walk-in tidak punya akun sehingga kolomnya nullable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub nama: String,
    /// Email untuk notifikasi; pelanggan walk-in boleh kosong
    pub email: Option<String>,
    pub no_hp: String,
    pub alamat: Option<String>,
    pub ktp: Option<String>,
    pub foto_ktp_url: Option<String>,
    pub foto_sim_url: Option<String>,
    pub catatan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
