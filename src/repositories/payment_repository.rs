use crate::models::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::utils::errors::{is_unique_violation, AppError, AppResult};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Catat pembayaran baru. Partial unique index `idx_payments_current`
    /// menolak pembayaran kedua selama masih ada yang pending/lunas.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        reservation_id: Uuid,
        jumlah: Decimal,
        metode: PaymentMethod,
        bukti_bayar_url: Option<String>,
        status: PaymentStatus,
        dicatat_oleh: Option<Uuid>,
        catatan_admin: Option<String>,
    ) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, reservation_id, jumlah, metode, bukti_bayar_url,
                                  status, dicatat_oleh, catatan_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reservation_id)
        .bind(jumlah)
        .bind(metode)
        .bind(bukti_bayar_url)
        .bind(status)
        .bind(dicatat_oleh)
        .bind(catatan_admin)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "idx_payments_current") {
                return AppError::Conflict {
                    message: "Pesanan ini sudah punya pembayaran yang sedang berjalan.".to_string(),
                    bentrok_mulai: None,
                    bentrok_selesai: None,
                };
            }
            AppError::from(e)
        })?;

        Ok(payment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    /// Pembayaran berjalan (pending/lunas) milik satu pesanan
    pub async fn find_current_by_reservation(
        &self,
        reservation_id: Uuid,
    ) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE reservation_id = $1 AND status <> 'gagal'",
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn list_all(&self, status: Option<PaymentStatus>) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE ($1::payment_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Customer: pembayaran atas pesanan miliknya sendiri
    pub async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT p.* FROM payments p
            JOIN reservations r ON r.id = p.reservation_id
            WHERE r.customer_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: PaymentStatus,
        dicatat_oleh: Option<Uuid>,
        catatan_admin: Option<String>,
    ) -> AppResult<Payment> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET status = $2,
                dicatat_oleh = COALESCE($3, dicatat_oleh),
                catatan_admin = COALESCE($4, catatan_admin),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(dicatat_oleh)
        .bind(catatan_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }
}
