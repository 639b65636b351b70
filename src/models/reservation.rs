//! Model Pesanan
//!
//! Pesanan sewa dengan state machine:
//! pending -> konfirmasi -> aktif -> selesai, dan batal dari semua
//! status non-terminal. Status blocking (pending/konfirmasi/aktif)
//! memblokir mobil dan supir terhadap booking lain yang overlap.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Status pesanan - memetakan ke ENUM reservation_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Menunggu pembayaran (awal untuk booking online)
    Pending,
    /// Dikonfirmasi / siap ambil (awal untuk booking offline)
    Konfirmasi,
    /// Sedang disewa
    Aktif,
    /// Selesai / dikembalikan (terminal)
    Selesai,
    /// Dibatalkan (terminal)
    Batal,
}

impl ReservationStatus {
    /// Status hold yang dibatalkan sweep saat tanggal mulainya sudah lewat.
    /// Aktif tidak pernah disapu: unitnya sedang di tangan pelanggan.
    pub const SWEEPABLE: [ReservationStatus; 2] =
        [ReservationStatus::Pending, ReservationStatus::Konfirmasi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Konfirmasi => "konfirmasi",
            ReservationStatus::Aktif => "aktif",
            ReservationStatus::Selesai => "selesai",
            ReservationStatus::Batal => "batal",
        }
    }

    /// Status terminal tidak pernah memblokir dan tidak bisa ditransisikan lagi
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Selesai | ReservationStatus::Batal)
    }

    /// Status yang memblokir mobil/supir terhadap booking overlap
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Konfirmasi | ReservationStatus::Aktif
        )
    }
}

/// Kanal pembuatan pesanan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "reservation_channel", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationChannel {
    Online,
    Offline,
}

/// Pesanan - memetakan ke tabel reservations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub kode_booking: String,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub promo_id: Option<Uuid>,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub total_hari: i32,
    pub harga_total: Decimal,
    pub denda: Decimal,
    pub status: ReservationStatus,
    pub type_pesanan: ReservationChannel,
    pub catatan: Option<String>,
    pub bukti_ktp_url: Option<String>,
    pub is_corporate: bool,
    pub perusahaan_nama: Option<String>,
    pub perusahaan_npwp: Option<String>,
    pub perusahaan_alamat: Option<String>,
    pub perusahaan_pic: Option<String>,
    pub perusahaan_pic_kontak: Option<String>,
    pub wa_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_statuses() {
        assert!(ReservationStatus::Pending.is_blocking());
        assert!(ReservationStatus::Konfirmasi.is_blocking());
        assert!(ReservationStatus::Aktif.is_blocking());
        assert!(!ReservationStatus::Selesai.is_blocking());
        assert!(!ReservationStatus::Batal.is_blocking());
    }

    #[test]
    fn test_sweep_hanya_menyasar_hold() {
        assert!(ReservationStatus::SWEEPABLE.contains(&ReservationStatus::Pending));
        assert!(ReservationStatus::SWEEPABLE.contains(&ReservationStatus::Konfirmasi));
        assert!(!ReservationStatus::SWEEPABLE.contains(&ReservationStatus::Aktif));
        assert!(!ReservationStatus::SWEEPABLE.contains(&ReservationStatus::Selesai));
        assert!(!ReservationStatus::SWEEPABLE.contains(&ReservationStatus::Batal));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ReservationStatus::Selesai.is_terminal());
        assert!(ReservationStatus::Batal.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::Konfirmasi.is_terminal());
        assert!(!ReservationStatus::Aktif.is_terminal());
    }
}
