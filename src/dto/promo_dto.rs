use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::promo::{DiscountKind, Promo, PromoReason};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePromoRequest {
    #[validate(length(min = 1, max = 20))]
    pub kode: String,
    #[validate(length(min = 1, max = 100))]
    pub nama_promo: String,
    pub keterangan: Option<String>,
    pub tipe_diskon: DiscountKind,
    pub nilai_diskon: Decimal,
    pub max_potongan: Option<Decimal>,
    pub min_transaksi: Option<Decimal>,
    /// 0 = unlimited
    pub kuota: Option<i32>,
    pub berlaku_mulai: DateTime<Utc>,
    pub berlaku_sampai: DateTime<Utc>,
    pub aktif: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePromoRequest {
    pub nama_promo: Option<String>,
    pub keterangan: Option<String>,
    pub nilai_diskon: Option<Decimal>,
    pub max_potongan: Option<Decimal>,
    pub min_transaksi: Option<Decimal>,
    pub kuota: Option<i32>,
    pub berlaku_mulai: Option<DateTime<Utc>>,
    pub berlaku_sampai: Option<DateTime<Utc>>,
    pub aktif: Option<bool>,
}

// Query /api/promo/cek-kode?kode=LEBARAN&total_belanja=500000
#[derive(Debug, Deserialize)]
pub struct CekKodeQuery {
    pub kode: String,
    pub total_belanja: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct CekKodeResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PromoReason>,
    pub estimasi_potongan: Decimal,
    pub total_awal: Decimal,
    pub total_akhir: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo: Option<Promo>,
}
