use crate::models::promo::{DiscountKind, Promo};
use crate::utils::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct PromoRepository {
    pool: PgPool,
}

impl PromoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        kode: String,
        nama_promo: String,
        keterangan: Option<String>,
        tipe_diskon: DiscountKind,
        nilai_diskon: Decimal,
        max_potongan: Decimal,
        min_transaksi: Decimal,
        kuota: i32,
        berlaku_mulai: DateTime<Utc>,
        berlaku_sampai: DateTime<Utc>,
        aktif: bool,
    ) -> AppResult<Promo> {
        // Kode selalu disimpan uppercase
        let promo = sqlx::query_as::<_, Promo>(
            r#"
            INSERT INTO promos (id, kode, nama_promo, keterangan, tipe_diskon, nilai_diskon,
                                max_potongan, min_transaksi, kuota, sudah_digunakan,
                                berlaku_mulai, berlaku_sampai, aktif, created_at, updated_at)
            VALUES ($1, UPPER($2), $3, $4, $5, $6, $7, $8, $9, 0, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(kode)
        .bind(nama_promo)
        .bind(keterangan)
        .bind(tipe_diskon)
        .bind(nilai_diskon)
        .bind(max_potongan)
        .bind(min_transaksi)
        .bind(kuota)
        .bind(berlaku_mulai)
        .bind(berlaku_sampai)
        .bind(aktif)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(promo)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Promo>> {
        let promo = sqlx::query_as::<_, Promo>("SELECT * FROM promos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(promo)
    }

    /// Lookup kode case-insensitive
    pub async fn find_by_kode(&self, kode: &str) -> AppResult<Option<Promo>> {
        let promo = sqlx::query_as::<_, Promo>("SELECT * FROM promos WHERE kode = UPPER($1)")
            .bind(kode)
            .fetch_optional(&self.pool)
            .await?;

        Ok(promo)
    }

    /// Admin: semua promo
    pub async fn list_all(&self) -> AppResult<Vec<Promo>> {
        let promos = sqlx::query_as::<_, Promo>("SELECT * FROM promos ORDER BY berlaku_sampai DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(promos)
    }

    /// Customer: hanya promo aktif, dalam jendela berlaku, dan kuotanya belum habis
    pub async fn list_redeemable(&self, now: DateTime<Utc>) -> AppResult<Vec<Promo>> {
        let promos = sqlx::query_as::<_, Promo>(
            r#"
            SELECT * FROM promos
            WHERE aktif = TRUE
              AND berlaku_mulai <= $1
              AND berlaku_sampai >= $1
              AND (kuota = 0 OR sudah_digunakan < kuota)
            ORDER BY berlaku_sampai DESC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(promos)
    }

    /// Konsumsi satu slot kuota secara atomik, di dalam transaksi booking.
    /// Conditional update menutup race dua request yang membaca kuota basi:
    /// yang kalah mendapat 0 baris dan booking-nya dibatalkan (rollback).
    pub async fn redeem(&self, conn: &mut PgConnection, promo_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE promos
            SET sudah_digunakan = sudah_digunakan + 1, updated_at = NOW()
            WHERE id = $1 AND (kuota = 0 OR sudah_digunakan < kuota)
            "#,
        )
        .bind(promo_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        nama_promo: Option<String>,
        keterangan: Option<String>,
        nilai_diskon: Option<Decimal>,
        max_potongan: Option<Decimal>,
        min_transaksi: Option<Decimal>,
        kuota: Option<i32>,
        berlaku_mulai: Option<DateTime<Utc>>,
        berlaku_sampai: Option<DateTime<Utc>>,
        aktif: Option<bool>,
    ) -> AppResult<Promo> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Promo tidak ditemukan".to_string()))?;

        let promo = sqlx::query_as::<_, Promo>(
            r#"
            UPDATE promos
            SET nama_promo = $2, keterangan = $3, nilai_diskon = $4, max_potongan = $5,
                min_transaksi = $6, kuota = $7, berlaku_mulai = $8, berlaku_sampai = $9,
                aktif = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nama_promo.unwrap_or(current.nama_promo))
        .bind(keterangan.or(current.keterangan))
        .bind(nilai_diskon.unwrap_or(current.nilai_diskon))
        .bind(max_potongan.unwrap_or(current.max_potongan))
        .bind(min_transaksi.unwrap_or(current.min_transaksi))
        .bind(kuota.unwrap_or(current.kuota))
        .bind(berlaku_mulai.unwrap_or(current.berlaku_mulai))
        .bind(berlaku_sampai.unwrap_or(current.berlaku_sampai))
        .bind(aktif.unwrap_or(current.aktif))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(promo)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM promos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.code().as_deref() == Some("23503") {
                        return AppError::Conflict {
                            message: "Promo sudah dipakai pesanan dan tidak bisa dihapus. Matikan dengan flag aktif.".to_string(),
                            bentrok_mulai: None,
                            bentrok_selesai: None,
                        };
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Promo tidak ditemukan".to_string()));
        }

        Ok(())
    }
}
