use crate::models::driver::{Driver, DriverStatus};
use crate::utils::errors::{AppError, AppResult};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nama: String,
        no_hp: String,
        harga_per_hari: Decimal,
        foto_url: Option<String>,
    ) -> AppResult<Driver> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, nama, no_hp, harga_per_hari, status, foto_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'tersedia', $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(nama)
        .bind(no_hp)
        .bind(harga_per_hari)
        .bind(foto_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY nama")
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    pub async fn update(
        &self,
        id: Uuid,
        nama: Option<String>,
        no_hp: Option<String>,
        harga_per_hari: Option<Decimal>,
        status: Option<DriverStatus>,
        foto_url: Option<String>,
    ) -> AppResult<Driver> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Supir tidak ditemukan".to_string()))?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET nama = $2, no_hp = $3, harga_per_hari = $4, status = $5, foto_url = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nama.unwrap_or(current.nama))
        .bind(no_hp.unwrap_or(current.no_hp))
        .bind(harga_per_hari.unwrap_or(current.harga_per_hari))
        .bind(status.unwrap_or(current.status))
        .bind(foto_url.or(current.foto_url))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    /// Hapus supir; FK RESTRICT menjaga supir yang punya riwayat pesanan.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.code().as_deref() == Some("23503") {
                        return AppError::Conflict {
                            message: "Supir tidak bisa dihapus karena masih punya riwayat pesanan. Gunakan status off.".to_string(),
                            bentrok_mulai: None,
                            bentrok_selesai: None,
                        };
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supir tidak ditemukan".to_string()));
        }

        Ok(())
    }
}
