use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{TransmissionKind, VehiclePopularity, VehicleStatus};

// Request membuat mobil baru
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub nama_mobil: String,
    pub merk: Option<String>,
    pub jenis: Option<String>,
    pub plat_nomor: Option<String>,
    #[validate(range(min = 1980, max = 2035))]
    pub tahun: Option<i32>,
    pub transmisi: Option<TransmissionKind>,
    #[validate(range(min = 1, max = 20))]
    pub kapasitas_kursi: Option<i32>,
    pub dengan_supir: Option<bool>,
    pub harga_per_hari: Decimal,
    pub denda_per_jam: Option<Decimal>,
    pub popularity: Option<VehiclePopularity>,
    pub gambar_base64: Option<String>,
    pub keterangan: Option<String>,
}

// Request update mobil (semua field opsional)
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    pub nama_mobil: Option<String>,
    pub merk: Option<String>,
    pub plat_nomor: Option<String>,
    pub harga_per_hari: Option<Decimal>,
    pub denda_per_jam: Option<Decimal>,
    pub status: Option<VehicleStatus>,
    pub popularity: Option<VehiclePopularity>,
    pub gambar_base64: Option<String>,
    pub keterangan: Option<String>,
}

// Filter katalog dari query string
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilter {
    pub status: Option<VehicleStatus>,
    pub merk: Option<String>,
    pub transmisi: Option<TransmissionKind>,
    pub min_kursi: Option<i32>,
    pub min_harga: Option<Decimal>,
    pub max_harga: Option<Decimal>,
    pub popularity: Option<VehiclePopularity>,
    pub dengan_supir: Option<bool>,
}
