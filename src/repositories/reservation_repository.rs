use crate::models::reservation::{Reservation, ReservationChannel, ReservationStatus};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

/// Resource yang bisa diblokir jadwalnya oleh pesanan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookedResource {
    Vehicle,
    Driver,
}

impl BookedResource {
    fn column(&self) -> &'static str {
        match self {
            BookedResource::Vehicle => "vehicle_id",
            BookedResource::Driver => "driver_id",
        }
    }
}

/// Rentang tanggal pesanan yang memblokir (untuk pesan error & kalender)
#[derive(Debug, Clone, Copy, Serialize, FromRow)]
pub struct BlockingRange {
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
}

/// Data lengkap pembuatan pesanan (dipakai di dalam transaksi booking)
pub struct NewReservation {
    pub kode_booking: String,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub promo_id: Option<Uuid>,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub total_hari: i32,
    pub harga_total: Decimal,
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
}

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Serialisasi pembuatan booking per resource: advisory lock transaksional
    /// dengan kunci 8 byte pertama UUID. Lock lepas otomatis saat commit/rollback.
    pub async fn lock_resource(&self, conn: &mut PgConnection, resource_id: Uuid) -> AppResult<()> {
        let key = i64::from_be_bytes(resource_id.as_bytes()[..8].try_into().expect("uuid has 16 bytes"));
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(key)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Cari satu pesanan blocking yang overlap dengan rentang kandidat.
    /// Overlap inklusif: s1 <= e2 AND e1 >= s2 (tanggal selesai tetap hari
    /// sewa, jadi half-open salah di sini). `exclude` dipakai saat edit agar
    /// pesanan tidak bentrok dengan dirinya sendiri.
    pub async fn find_blocking_overlap<'e, E: PgExecutor<'e>>(
        &self,
        executor: E,
        resource: BookedResource,
        resource_id: Uuid,
        tanggal_mulai: NaiveDate,
        tanggal_selesai: NaiveDate,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<BlockingRange>> {
        // Kolom berasal dari enum, bukan input user
        let query = format!(
            r#"
            SELECT tanggal_mulai, tanggal_selesai FROM reservations
            WHERE {} = $1
              AND status IN ('pending', 'konfirmasi', 'aktif')
              AND tanggal_mulai <= $3
              AND tanggal_selesai >= $2
              AND ($4::uuid IS NULL OR id <> $4)
            LIMIT 1
            "#,
            resource.column()
        );

        let range = sqlx::query_as::<_, BlockingRange>(&query)
            .bind(resource_id)
            .bind(tanggal_mulai)
            .bind(tanggal_selesai)
            .bind(exclude)
            .fetch_optional(executor)
            .await?;

        Ok(range)
    }

    /// Insert di dalam transaksi booking. Mengembalikan sqlx::Error mentah
    /// supaya pemanggil bisa membedakan tabrakan kode booking (retry) dari
    /// pelanggaran exclusion constraint (conflict).
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &NewReservation,
    ) -> Result<Reservation, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (
                id, kode_booking, customer_id, vehicle_id, driver_id, promo_id,
                tanggal_mulai, tanggal_selesai, total_hari, harga_total, denda,
                status, type_pesanan, catatan, bukti_ktp_url, is_corporate,
                perusahaan_nama, perusahaan_npwp, perusahaan_alamat, perusahaan_pic,
                perusahaan_pic_kontak, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $21)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.kode_booking)
        .bind(data.customer_id)
        .bind(data.vehicle_id)
        .bind(data.driver_id)
        .bind(data.promo_id)
        .bind(data.tanggal_mulai)
        .bind(data.tanggal_selesai)
        .bind(data.total_hari)
        .bind(data.harga_total)
        .bind(data.status)
        .bind(data.type_pesanan)
        .bind(&data.catatan)
        .bind(&data.bukti_ktp_url)
        .bind(data.is_corporate)
        .bind(&data.perusahaan_nama)
        .bind(&data.perusahaan_npwp)
        .bind(&data.perusahaan_alamat)
        .bind(&data.perusahaan_pic)
        .bind(&data.perusahaan_pic_kontak)
        .bind(Utc::now())
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(reservation)
    }

    pub async fn find_by_kode(&self, kode_booking: &str) -> AppResult<Option<Reservation>> {
        let reservation =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE kode_booking = $1")
                .bind(kode_booking)
                .fetch_optional(&self.pool)
                .await?;

        Ok(reservation)
    }

    /// Admin: semua pesanan, terbaru dulu, filter status opsional
    pub async fn list_all(&self, status: Option<ReservationStatus>) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE ($1::reservation_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Customer: hanya pesanan miliknya sendiri
    pub async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Tutup pesanan: status selesai + denda + catatan keterlambatan
    pub async fn complete(
        &self,
        id: Uuid,
        denda: Decimal,
        catatan: Option<String>,
    ) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'selesai', denda = $2, catatan = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(denda)
        .bind(catatan)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Sweep pesanan zombie: hold (`ReservationStatus::SWEEPABLE`) yang
    /// tanggal mulainya sudah lewat dibatalkan massal. Satu UPDATE, idempoten.
    pub async fn sweep_expired(&self, today: NaiveDate) -> AppResult<u64> {
        let sasaran: Vec<String> = ReservationStatus::SWEEPABLE
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET status = 'batal', updated_at = NOW()
            WHERE status = ANY($2::reservation_status[])
              AND tanggal_mulai < $1
            "#,
        )
        .bind(today)
        .bind(&sasaran)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mobil aktif yang masih kosong untuk rentang tanggal, time-aware:
    /// hold pending/konfirmasi yang tanggal mulainya sudah lewat dianggap
    /// basi (calon sweep) dan tidak memblokir.
    pub async fn available_vehicles(
        &self,
        tanggal_mulai: NaiveDate,
        tanggal_selesai: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles v
            WHERE v.status = 'aktif'
              AND NOT EXISTS (
                  SELECT 1 FROM reservations r
                  WHERE r.vehicle_id = v.id
                    AND r.tanggal_mulai <= $2
                    AND r.tanggal_selesai >= $1
                    AND (
                        (r.status IN ('pending', 'konfirmasi') AND r.tanggal_mulai >= $3)
                        OR (r.status = 'aktif' AND r.tanggal_selesai >= $3)
                    )
              )
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(tanggal_mulai)
        .bind(tanggal_selesai)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Tanggal terblokir sebuah mobil untuk widget kalender frontend
    pub async fn unavailable_dates(
        &self,
        vehicle_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<BlockingRange>> {
        let ranges = sqlx::query_as::<_, BlockingRange>(
            r#"
            SELECT tanggal_mulai, tanggal_selesai FROM reservations
            WHERE vehicle_id = $1
              AND (
                  (status IN ('pending', 'konfirmasi') AND tanggal_mulai >= $2)
                  OR (status = 'aktif' AND tanggal_selesai >= $2)
              )
            ORDER BY tanggal_mulai
            "#,
        )
        .bind(vehicle_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(ranges)
    }

    /// Tandai notifikasi WA admin sudah dikirim (dashboard tidak menampilkan
    /// tombol kirim dua kali)
    pub async fn mark_wa_sent(&self, id: Uuid) -> AppResult<Reservation> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET wa_sent_at = NOW(), updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Cek apakah pesanan masih punya pembayaran berjalan (pending/lunas)
    pub async fn has_current_payment(&self, reservation_id: Uuid) -> AppResult<bool> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM payments WHERE reservation_id = $1 AND status <> 'gagal')",
        )
        .bind(reservation_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }
}

impl From<BlockingRange> for AppError {
    fn from(range: BlockingRange) -> Self {
        AppError::Conflict {
            message: format!(
                "Jadwal tidak tersedia. Sudah dibooking tanggal {} s/d {}.",
                range.tanggal_mulai, range.tanggal_selesai
            ),
            bentrok_mulai: Some(range.tanggal_mulai),
            bentrok_selesai: Some(range.tanggal_selesai),
        }
    }
}
