use crate::models::customer::Customer;
use crate::utils::errors::AppResult;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Option<Uuid>,
        nama: String,
        email: Option<String>,
        no_hp: String,
        alamat: Option<String>,
        ktp: Option<String>,
        foto_ktp_url: Option<String>,
    ) -> AppResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, user_id, nama, email, no_hp, alamat, ktp, foto_ktp_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(nama)
        .bind(email)
        .bind(no_hp)
        .bind(alamat)
        .bind(ktp)
        .bind(foto_ktp_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Profil pelanggan milik subject auth eksternal (booking online)
    pub async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Admin: daftar pelanggan untuk form booking walk-in
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(customers)
    }
}
