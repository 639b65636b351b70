use crate::dto::vehicle_dto::VehicleFilter;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        nama_mobil: String,
        merk: Option<String>,
        jenis: Option<String>,
        plat_nomor: Option<String>,
        tahun: Option<i32>,
        transmisi: crate::models::vehicle::TransmissionKind,
        kapasitas_kursi: i32,
        dengan_supir: bool,
        harga_per_hari: Decimal,
        denda_per_jam: Decimal,
        popularity: crate::models::vehicle::VehiclePopularity,
        gambar_url: Option<String>,
        keterangan: Option<String>,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, nama_mobil, merk, jenis, plat_nomor, tahun, transmisi,
                                  kapasitas_kursi, dengan_supir, harga_per_hari, denda_per_jam,
                                  status, popularity, gambar_url, keterangan, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'aktif', $12, $13, $14, $15, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nama_mobil)
        .bind(merk)
        .bind(jenis)
        .bind(plat_nomor)
        .bind(tahun)
        .bind(transmisi)
        .bind(kapasitas_kursi)
        .bind(dengan_supir)
        .bind(harga_per_hari)
        .bind(denda_per_jam)
        .bind(popularity)
        .bind(gambar_url)
        .bind(keterangan)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Katalog dengan filter frontend. Non-admin selalu dibatasi ke status aktif
    /// oleh controller (lewat `filter.status`).
    pub async fn list(&self, filter: &VehicleFilter) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR merk ILIKE '%' || $2 || '%')
              AND ($3::transmission_kind IS NULL OR transmisi = $3)
              AND ($4::int IS NULL OR kapasitas_kursi >= $4)
              AND ($5::numeric IS NULL OR harga_per_hari >= $5)
              AND ($6::numeric IS NULL OR harga_per_hari <= $6)
              AND ($7::vehicle_popularity IS NULL OR popularity = $7)
              AND ($8::bool IS NULL OR dengan_supir = $8)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.status)
        .bind(filter.merk.as_deref())
        .bind(filter.transmisi)
        .bind(filter.min_kursi)
        .bind(filter.min_harga)
        .bind(filter.max_harga)
        .bind(filter.popularity)
        .bind(filter.dengan_supir)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// "Mobil Pilihan" homepage: unit aktif ber-label marketing dulu,
    /// sisanya diisi unit standard terbaru.
    pub async fn rekomendasi(&self, limit: i64) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE status = 'aktif'
            ORDER BY (popularity = 'standard') ASC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        nama_mobil: Option<String>,
        merk: Option<String>,
        plat_nomor: Option<String>,
        harga_per_hari: Option<Decimal>,
        denda_per_jam: Option<Decimal>,
        status: Option<VehicleStatus>,
        popularity: Option<crate::models::vehicle::VehiclePopularity>,
        gambar_url: Option<String>,
        keterangan: Option<String>,
    ) -> AppResult<Vehicle> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mobil tidak ditemukan".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET nama_mobil = $2, merk = $3, plat_nomor = $4, harga_per_hari = $5,
                denda_per_jam = $6, status = $7, popularity = $8, gambar_url = $9,
                keterangan = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nama_mobil.unwrap_or(current.nama_mobil))
        .bind(merk.or(current.merk))
        .bind(plat_nomor.or(current.plat_nomor))
        .bind(harga_per_hari.unwrap_or(current.harga_per_hari))
        .bind(denda_per_jam.unwrap_or(current.denda_per_jam))
        .bind(status.unwrap_or(current.status))
        .bind(popularity.unwrap_or(current.popularity))
        .bind(gambar_url.or(current.gambar_url))
        .bind(keterangan.or(current.keterangan))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Hapus mobil. FK RESTRICT dari reservations menjaga integritas:
    /// mobil yang pernah dipesan tidak bisa dihapus.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.code().as_deref() == Some("23503") {
                        return AppError::Conflict {
                            message: "Mobil tidak bisa dihapus karena masih punya riwayat pesanan. Arsipkan dengan status nonaktif.".to_string(),
                            bentrok_mulai: None,
                            bentrok_selesai: None,
                        };
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Mobil tidak ditemukan".to_string()));
        }

        Ok(())
    }
}
