//! Mesin diskon promo
//!
//! Quote = hitungan potongan tanpa efek samping; penukaran kuota terjadi
//! terpisah lewat conditional UPDATE di `PromoRepository::redeem`, di dalam
//! transaksi booking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::promo::{DiscountKind, Promo, PromoReason};

/// Hasil quote sebuah promo terhadap subtotal
#[derive(Debug, Clone, Serialize)]
pub struct PromoQuote {
    pub potongan: Decimal,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PromoReason>,
}

impl PromoQuote {
    fn rejected(reason: PromoReason) -> Self {
        Self {
            potongan: Decimal::ZERO,
            ok: false,
            reason: Some(reason),
        }
    }
}

/// Validasi promo dan hitung potongannya untuk `subtotal` pada waktu `now`.
/// Urutan penolakan: aktif, jendela waktu, kuota, minimal transaksi.
pub fn quote(promo: &Promo, subtotal: Decimal, now: DateTime<Utc>) -> PromoQuote {
    if !promo.aktif {
        return PromoQuote::rejected(PromoReason::Inactive);
    }

    if now < promo.berlaku_mulai || now > promo.berlaku_sampai {
        return PromoQuote::rejected(PromoReason::OutOfWindow);
    }

    if !promo.kuota_tersedia() {
        return PromoQuote::rejected(PromoReason::QuotaExhausted);
    }

    if subtotal < promo.min_transaksi {
        return PromoQuote::rejected(PromoReason::BelowMinimum);
    }

    let mut potongan = match promo.tipe_diskon {
        DiscountKind::Nominal => promo.nilai_diskon,
        DiscountKind::Persen => {
            let raw = subtotal * promo.nilai_diskon / Decimal::from(100);
            if promo.max_potongan > Decimal::ZERO && raw > promo.max_potongan {
                promo.max_potongan
            } else {
                raw
            }
        }
    };

    // Diskon tidak boleh membuat total minus
    if potongan > subtotal {
        potongan = subtotal;
    }

    PromoQuote {
        potongan,
        ok: true,
        reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn promo_base() -> Promo {
        let now = Utc::now();
        Promo {
            id: Uuid::new_v4(),
            kode: "LEBARAN".to_string(),
            nama_promo: "Promo Lebaran".to_string(),
            keterangan: None,
            tipe_diskon: DiscountKind::Nominal,
            nilai_diskon: Decimal::from(50_000),
            max_potongan: Decimal::ZERO,
            min_transaksi: Decimal::ZERO,
            kuota: 0,
            sudah_digunakan: 0,
            berlaku_mulai: now - Duration::days(1),
            berlaku_sampai: now + Duration::days(1),
            aktif: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_nominal_deduction() {
        let q = quote(&promo_base(), Decimal::from(500_000), Utc::now());
        assert!(q.ok);
        assert_eq!(q.potongan, Decimal::from(50_000));
    }

    #[test]
    fn test_percentage_capped() {
        // 20% dari 500rb = 100rb, tapi cap 30rb
        let mut promo = promo_base();
        promo.tipe_diskon = DiscountKind::Persen;
        promo.nilai_diskon = Decimal::from(20);
        promo.max_potongan = Decimal::from(30_000);

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert!(q.ok);
        assert_eq!(q.potongan, Decimal::from(30_000));
    }

    #[test]
    fn test_percentage_uncapped_when_zero() {
        let mut promo = promo_base();
        promo.tipe_diskon = DiscountKind::Persen;
        promo.nilai_diskon = Decimal::from(20);

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert_eq!(q.potongan, Decimal::from(100_000));
    }

    #[test]
    fn test_inactive_rejected() {
        let mut promo = promo_base();
        promo.aktif = false;

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert!(!q.ok);
        assert_eq!(q.reason, Some(PromoReason::Inactive));
    }

    #[test]
    fn test_out_of_window_rejected() {
        let promo = promo_base();
        let q = quote(&promo, Decimal::from(500_000), Utc::now() + Duration::days(10));
        assert!(!q.ok);
        assert_eq!(q.reason, Some(PromoReason::OutOfWindow));
    }

    #[test]
    fn test_quota_exhausted_rejected_regardless_of_window() {
        let mut promo = promo_base();
        promo.kuota = 1;
        promo.sudah_digunakan = 1;

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert!(!q.ok);
        assert_eq!(q.reason, Some(PromoReason::QuotaExhausted));
    }

    #[test]
    fn test_below_minimum_rejected() {
        let mut promo = promo_base();
        promo.min_transaksi = Decimal::from(1_000_000);

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert!(!q.ok);
        assert_eq!(q.reason, Some(PromoReason::BelowMinimum));
    }

    #[test]
    fn test_deduction_never_exceeds_subtotal() {
        let mut promo = promo_base();
        promo.nilai_diskon = Decimal::from(750_000);

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert!(q.ok);
        assert_eq!(q.potongan, Decimal::from(500_000));
    }

    #[test]
    fn test_unlimited_quota_zero() {
        let mut promo = promo_base();
        promo.kuota = 0;
        promo.sudah_digunakan = 9_999;

        let q = quote(&promo, Decimal::from(500_000), Utc::now());
        assert!(q.ok);
    }

    #[test]
    fn test_kuota_tersedia_batas() {
        let mut promo = promo_base();
        promo.kuota = 2;

        promo.sudah_digunakan = 1;
        assert!(promo.kuota_tersedia());

        // Pemakaian terakhir menutup kuota; penukaran berikutnya kalah
        promo.sudah_digunakan = 2;
        assert!(!promo.kuota_tersedia());

        promo.kuota = 0;
        assert!(promo.kuota_tersedia());
    }
}
