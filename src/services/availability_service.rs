//! Pengecekan ketersediaan mobil dan supir
//!
//! Dua pesanan dianggap bentrok jika rentangnya overlap inklusif:
//! `s1 <= e2 AND e1 >= s2`. Tanggal selesai adalah hari sewa penuh,
//! jadi pesanan yang berakhir hari X bentrok dengan yang mulai hari X.

use chrono::NaiveDate;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::repositories::reservation_repository::{
    BlockingRange, BookedResource, ReservationRepository,
};
use crate::utils::errors::{AppError, AppResult};

/// Tes overlap inklusif untuk dua rentang tanggal
pub fn ranges_overlap(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && e1 >= s2
}

/// Cek bentrok satu resource lewat pool (jalur read/endpoint publik).
/// Mengembalikan rentang pesanan yang memblokir bila ada.
pub async fn find_conflict(
    repo: &ReservationRepository,
    resource: BookedResource,
    resource_id: Uuid,
    tanggal_mulai: NaiveDate,
    tanggal_selesai: NaiveDate,
    exclude: Option<Uuid>,
) -> AppResult<Option<BlockingRange>> {
    repo.find_blocking_overlap(
        repo.pool(),
        resource,
        resource_id,
        tanggal_mulai,
        tanggal_selesai,
        exclude,
    )
    .await
}

/// Re-check ketersediaan di dalam transaksi booking (setelah advisory lock).
/// Mobil dicek dulu, lalu supir bila diminta; gagal salah satu = booking gagal.
pub async fn ensure_available(
    repo: &ReservationRepository,
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    driver_id: Option<Uuid>,
    tanggal_mulai: NaiveDate,
    tanggal_selesai: NaiveDate,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    if let Some(range) = repo
        .find_blocking_overlap(
            &mut *conn,
            BookedResource::Vehicle,
            vehicle_id,
            tanggal_mulai,
            tanggal_selesai,
            exclude,
        )
        .await?
    {
        return Err(AppError::from(range));
    }

    if let Some(supir_id) = driver_id {
        if let Some(range) = repo
            .find_blocking_overlap(
                &mut *conn,
                BookedResource::Driver,
                supir_id,
                tanggal_mulai,
                tanggal_selesai,
                exclude,
            )
            .await?
        {
            return Err(AppError::Conflict {
                message: format!(
                    "Supir sedang bertugas pada tanggal {} s/d {}.",
                    range.tanggal_mulai, range.tanggal_selesai
                ),
                bentrok_mulai: Some(range.tanggal_mulai),
                bentrok_selesai: Some(range.tanggal_selesai),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    #[test]
    fn test_overlap_touching_end_is_conflict() {
        // R1 berakhir tepat saat R2 mulai -> bentrok (inklusif)
        assert!(ranges_overlap(d(1), d(5), d(5), d(8)));
    }

    #[test]
    fn test_gap_of_one_day_is_free() {
        // R1 berakhir sehari sebelum R2 mulai -> aman
        assert!(!ranges_overlap(d(1), d(4), d(5), d(8)));
    }

    #[test]
    fn test_contained_range_is_conflict() {
        assert!(ranges_overlap(d(1), d(10), d(3), d(5)));
        assert!(ranges_overlap(d(3), d(5), d(1), d(10)));
    }

    #[test]
    fn test_identical_single_day_is_conflict() {
        assert!(ranges_overlap(d(7), d(7), d(7), d(7)));
    }

    #[test]
    fn test_disjoint_ranges_are_free() {
        assert!(!ranges_overlap(d(20), d(25), d(1), d(10)));
    }
}
