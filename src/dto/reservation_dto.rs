use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::reservation::{Reservation, ReservationStatus};

// Request booking dari pelanggan (channel online)
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub promo_code: Option<String>,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub catatan: Option<String>,
    pub bukti_ktp_base64: Option<String>,
    #[serde(default)]
    pub is_corporate: bool,
    pub perusahaan_nama: Option<String>,
    pub perusahaan_npwp: Option<String>,
    pub perusahaan_alamat: Option<String>,
    pub perusahaan_pic: Option<String>,
    pub perusahaan_pic_kontak: Option<String>,
}

// Booking walk-in yang dicatat admin atas nama pelanggan
#[derive(Debug, Deserialize)]
pub struct AdminCreateReservationRequest {
    pub customer_id: Uuid,
    #[serde(flatten)]
    pub booking: CreateReservationRequest,
}

#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    pub status: Option<ReservationStatus>,
}

// Query /api/pesanan/cek-ketersediaan
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
}

#[derive(Debug, Deserialize, Default)]
pub struct CompleteReservationRequest {
    /// Tanggal mobil benar-benar dikembalikan, default hari ini
    pub tanggal_kembali: Option<NaiveDate>,
}

// Pesanan plus field turunan yang dibutuhkan frontend admin
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub nama_mobil: String,
    pub nama_pelanggan: String,
    pub link_wa: String,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub dibatalkan: u64,
}

// Hasil cek cepat jadwal satu mobil
#[derive(Debug, Serialize)]
pub struct VehicleScheduleCheck {
    pub tersedia: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bentrok: Option<crate::repositories::reservation_repository::BlockingRange>,
}

#[derive(Debug, Serialize)]
pub struct CompleteReservationResponse {
    #[serde(flatten)]
    pub reservation: Reservation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_keterlambatan: Option<String>,
}
