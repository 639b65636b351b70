//! Model Pembayaran
//!
//! Satu pesanan punya maksimal satu pembayaran berjalan; pembayaran
//! `gagal` boleh digantikan pengajuan baru (partial unique index di DB).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Transfer,
    Cash,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Menunggu verifikasi admin
    Pending,
    /// Lunas / terverifikasi
    Lunas,
    /// Ditolak
    Gagal,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Lunas => "lunas",
            PaymentStatus::Gagal => "gagal",
        }
    }
}

/// Pembayaran - memetakan ke tabel payments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub jumlah: Decimal,
    pub metode: PaymentMethod,
    pub bukti_bayar_url: Option<String>,
    pub status: PaymentStatus,
    /// Admin yang menerima uang tunai (audit trail untuk offline)
    pub dicatat_oleh: Option<Uuid>,
    pub catatan_admin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
