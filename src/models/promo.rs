//! Model Promo
//!
//! Kode diskon dengan jendela berlaku, syarat minimal transaksi dan kuota.
//! Logika quote/penukaran ada di `services::promo_service`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "discount_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Potongan nominal rupiah
    Nominal,
    /// Potongan persentase dengan batas max_potongan opsional
    Persen,
}

/// Alasan penolakan promo saat quote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PromoReason {
    Inactive,
    OutOfWindow,
    QuotaExhausted,
    BelowMinimum,
}

impl PromoReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromoReason::Inactive => "inactive",
            PromoReason::OutOfWindow => "out_of_window",
            PromoReason::QuotaExhausted => "quota_exhausted",
            PromoReason::BelowMinimum => "below_minimum",
        }
    }

    /// Pesan untuk ditampilkan ke user
    pub fn message(&self) -> &'static str {
        match self {
            PromoReason::Inactive => "Kode promo tidak aktif.",
            PromoReason::OutOfWindow => "Kode promo belum berlaku atau sudah berakhir.",
            PromoReason::QuotaExhausted => "Kuota promo sudah habis.",
            PromoReason::BelowMinimum => "Total transaksi belum memenuhi minimal promo.",
        }
    }
}

/// Promo - memetakan ke tabel promos. Kode disimpan uppercase.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Promo {
    pub id: Uuid,
    pub kode: String,
    pub nama_promo: String,
    pub keterangan: Option<String>,
    pub tipe_diskon: DiscountKind,
    pub nilai_diskon: Decimal,
    /// Batas potongan untuk tipe persen. 0 = tanpa batas.
    pub max_potongan: Decimal,
    pub min_transaksi: Decimal,
    /// Batas jumlah penggunaan. 0 = unlimited.
    pub kuota: i32,
    pub sudah_digunakan: i32,
    pub berlaku_mulai: DateTime<Utc>,
    pub berlaku_sampai: DateTime<Utc>,
    pub aktif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promo {
    /// Masih ada jatah penggunaan? Kuota 0 berarti tanpa batas. Predikat
    /// yang sama dengan klausa WHERE pada conditional UPDATE di
    /// `PromoRepository::redeem`.
    pub fn kuota_tersedia(&self) -> bool {
        self.kuota == 0 || self.sudah_digunakan < self.kuota
    }
}
