//! Kalkulator harga sewa
//!
//! Fungsi murni: tarif harian mobil (+ supir opsional) dikali durasi.
//! Durasi dihitung inklusif kedua ujung: sewa 17-19 Agustus = 3 hari.
//! Semua uang pakai Decimal, tidak ada aritmetika float.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

/// Durasi sewa dalam hari, inklusif kedua ujung
pub fn rental_days(tanggal_mulai: NaiveDate, tanggal_selesai: NaiveDate) -> AppResult<i64> {
    if tanggal_selesai < tanggal_mulai {
        return Err(AppError::Validation(
            "Tanggal selesai tidak boleh sebelum tanggal mulai.".to_string(),
        ));
    }
    Ok((tanggal_selesai - tanggal_mulai).num_days() + 1)
}

/// Subtotal sewa: mobil x durasi + (supir x durasi jika ada)
pub fn compute(
    harga_mobil: Decimal,
    harga_supir: Option<Decimal>,
    tanggal_mulai: NaiveDate,
    tanggal_selesai: NaiveDate,
) -> AppResult<Decimal> {
    let durasi = Decimal::from(rental_days(tanggal_mulai, tanggal_selesai)?);

    let mut total = harga_mobil * durasi;
    if let Some(supir) = harga_supir {
        total += supir * durasi;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_single_day_is_inclusive() {
        let total = compute(Decimal::from(100_000), None, d(2025, 8, 1), d(2025, 8, 1)).unwrap();
        assert_eq!(total, Decimal::from(100_000));
    }

    #[test]
    fn test_three_days_with_driver() {
        let total = compute(
            Decimal::from(100_000),
            Some(Decimal::from(50_000)),
            d(2025, 8, 1),
            d(2025, 8, 3),
        )
        .unwrap();
        assert_eq!(total, Decimal::from(450_000));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = compute(Decimal::from(100_000), None, d(2025, 8, 3), d(2025, 8, 1));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rental_days() {
        assert_eq!(rental_days(d(2025, 8, 1), d(2025, 8, 1)).unwrap(), 1);
        assert_eq!(rental_days(d(2025, 8, 1), d(2025, 8, 7)).unwrap(), 7);
    }
}
