//! Model Mobil
//!
//! Unit kendaraan yang disewakan. Hanya status `aktif` yang boleh
//! menerima pesanan baru.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Status operasional mobil - memetakan ke ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Aktif,
    Servis,
    Nonaktif,
}

/// Label marketing untuk katalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_popularity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehiclePopularity {
    Standard,
    Bestseller,
    Hotdeal,
    New,
    Recommended,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "transmission_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransmissionKind {
    Manual,
    Matic,
}

/// Mobil - memetakan ke tabel vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub nama_mobil: String,
    pub merk: Option<String>,
    pub jenis: Option<String>,
    pub plat_nomor: Option<String>,
    pub tahun: Option<i32>,
    pub transmisi: TransmissionKind,
    pub kapasitas_kursi: i32,
    pub dengan_supir: bool,
    pub harga_per_hari: Decimal,
    pub denda_per_jam: Decimal,
    pub status: VehicleStatus,
    pub popularity: VehiclePopularity,
    pub gambar_url: Option<String>,
    pub keterangan: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
