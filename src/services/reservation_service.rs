//! Siklus hidup pesanan
//!
//! Satu-satunya jalur pembuatan booking (online maupun walk-in) dan semua
//! transisi status: pending -> konfirmasi -> aktif -> selesai, dengan batal
//! dari status non-terminal mana pun. Pembuatan booking berjalan dalam satu
//! transaksi: advisory lock per resource, re-check ketersediaan, penukaran
//! kuota promo, lalu insert dengan retry kode booking.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::dto::reservation_dto::{CreateReservationRequest, ReservationResponse};
use crate::middleware::auth::{AuthUser, Role};
use crate::models::customer::Customer;
use crate::models::promo::PromoReason;
use crate::models::reservation::{Reservation, ReservationChannel, ReservationStatus};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::promo_repository::PromoRepository;
use crate::repositories::reservation_repository::{NewReservation, ReservationRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service;
use crate::services::notification_service::NotificationService;
use crate::services::pricing_service;
use crate::services::promo_service;
use crate::services::storage_service::{decode_base64_image, BlobStore, HttpBlobStore};
use crate::state::AppState;
use crate::utils::errors::{is_unique_violation, AppError, AppResult};

const KODE_BOOKING_MAX_RETRY: usize = 5;

pub struct ReservationService {
    pool: PgPool,
    config: EnvironmentConfig,
    reservations: ReservationRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    customers: CustomerRepository,
    promos: PromoRepository,
    notifications: NotificationService,
    storage: Arc<dyn BlobStore>,
}

impl ReservationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
            config: state.config.clone(),
            reservations: ReservationRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            drivers: DriverRepository::new(state.pool.clone()),
            customers: CustomerRepository::new(state.pool.clone()),
            promos: PromoRepository::new(state.pool.clone()),
            notifications: NotificationService::new(state.http_client.clone(), &state.config),
            storage: Arc::new(HttpBlobStore::new(
                state.http_client.clone(),
                state.config.blob_store_url.clone(),
            )),
        }
    }

    /// Booking online oleh pelanggan sendiri. Masuk sebagai pending dan
    /// memicu email notifikasi ke admin + pelanggan.
    pub async fn create_online(
        &self,
        user_id: Uuid,
        req: CreateReservationRequest,
    ) -> AppResult<Reservation> {
        let customer = self
            .customers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Profil pelanggan belum terdaftar.".to_string())
            })?;

        self.create_booking(
            customer,
            req,
            ReservationChannel::Online,
            ReservationStatus::Pending,
        )
        .await
    }

    /// Booking walk-in yang dicatat admin atas nama pelanggan. Langsung
    /// konfirmasi karena admin sudah memegang unit, tanpa email otomatis.
    pub async fn create_offline(
        &self,
        customer_id: Uuid,
        req: CreateReservationRequest,
    ) -> AppResult<Reservation> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pelanggan tidak ditemukan.".to_string()))?;

        self.create_booking(
            customer,
            req,
            ReservationChannel::Offline,
            ReservationStatus::Konfirmasi,
        )
        .await
    }

    async fn create_booking(
        &self,
        customer: Customer,
        req: CreateReservationRequest,
        channel: ReservationChannel,
        status_awal: ReservationStatus,
    ) -> AppResult<Reservation> {
        if req.is_corporate
            && req
                .perusahaan_nama
                .as_deref()
                .map_or(true, |nama| nama.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Nama perusahaan wajib diisi untuk sewa corporate.".to_string(),
            ));
        }

        let total_hari = pricing_service::rental_days(req.tanggal_mulai, req.tanggal_selesai)?;

        let vehicle = self
            .vehicles
            .find_by_id(req.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mobil tidak ditemukan.".to_string()))?;

        if vehicle.status != VehicleStatus::Aktif {
            return Err(AppError::Validation(
                "Mobil sedang tidak tersedia untuk disewa.".to_string(),
            ));
        }

        let driver = match req.driver_id {
            Some(driver_id) => Some(
                self.drivers
                    .find_by_id(driver_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Supir tidak ditemukan.".to_string()))?,
            ),
            None => None,
        };

        let subtotal = pricing_service::compute(
            vehicle.harga_per_hari,
            driver.as_ref().map(|d| d.harga_per_hari),
            req.tanggal_mulai,
            req.tanggal_selesai,
        )?;

        // Harga dikunci saat pembuatan; perubahan tarif belakangan tidak
        // mengubah pesanan yang sudah ada.
        let promo = match req.promo_code.as_deref() {
            Some(kode) if !kode.trim().is_empty() => {
                let promo = self.promos.find_by_kode(kode).await?.ok_or_else(|| {
                    AppError::NotFound("Kode promo tidak ditemukan.".to_string())
                })?;

                let quote = promo_service::quote(&promo, subtotal, Utc::now());
                if !quote.ok {
                    let reason = quote.reason.unwrap_or(PromoReason::Inactive);
                    return Err(AppError::Promo {
                        reason,
                        message: reason.message().to_string(),
                    });
                }
                Some((promo, quote.potongan))
            }
            _ => None,
        };

        let potongan = promo.as_ref().map_or(Decimal::ZERO, |(_, p)| *p);
        let harga_total = subtotal - potongan;

        let bukti_ktp_url = match req.bukti_ktp_base64.as_deref() {
            Some(data) => {
                let bytes = decode_base64_image(data)?;
                let path = format!("ktp_uploads/{}.jpg", Uuid::new_v4());
                Some(self.storage.store_file(bytes, &path).await?)
            }
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        // Lock per resource supaya dua booking mobil/supir yang sama antri,
        // bukan balapan. Urutan mobil lalu supir konsisten di semua jalur.
        self.reservations
            .lock_resource(tx.as_mut(), req.vehicle_id)
            .await?;
        if let Some(driver_id) = req.driver_id {
            self.reservations.lock_resource(tx.as_mut(), driver_id).await?;
        }

        availability_service::ensure_available(
            &self.reservations,
            tx.as_mut(),
            req.vehicle_id,
            req.driver_id,
            req.tanggal_mulai,
            req.tanggal_selesai,
            None,
        )
        .await?;

        if let Some((promo, _)) = &promo {
            // Quote di atas hanya estimasi; kuota final direbut di sini
            let redeemed = self.promos.redeem(tx.as_mut(), promo.id).await?;
            if !redeemed {
                return Err(AppError::Promo {
                    reason: PromoReason::QuotaExhausted,
                    message: PromoReason::QuotaExhausted.message().to_string(),
                });
            }
        }

        let data = NewReservation {
            kode_booking: String::new(),
            customer_id: customer.id,
            vehicle_id: req.vehicle_id,
            driver_id: req.driver_id,
            promo_id: promo.as_ref().map(|(p, _)| p.id),
            tanggal_mulai: req.tanggal_mulai,
            tanggal_selesai: req.tanggal_selesai,
            total_hari: total_hari as i32,
            harga_total,
            status: status_awal,
            type_pesanan: channel,
            catatan: req.catatan,
            bukti_ktp_url,
            is_corporate: req.is_corporate,
            perusahaan_nama: req.perusahaan_nama,
            perusahaan_npwp: req.perusahaan_npwp,
            perusahaan_alamat: req.perusahaan_alamat,
            perusahaan_pic: req.perusahaan_pic,
            perusahaan_pic_kontak: req.perusahaan_pic_kontak,
        };

        let reservation = self.insert_with_kode_retry(&mut tx, data).await?;

        tx.commit().await?;

        log::info!(
            "✅ Pesanan {} dibuat ({:?}, {} hari, total Rp {})",
            reservation.kode_booking,
            channel,
            total_hari,
            reservation.harga_total
        );

        if channel == ReservationChannel::Online {
            self.notifications.notify_new_order(
                &reservation,
                &vehicle.nama_mobil,
                &customer.nama,
                customer.email.as_deref(),
            );
        }

        Ok(reservation)
    }

    /// Insert dengan retry bila kode booking acak kebetulan tabrakan.
    /// Tiap percobaan dipagari savepoint: unique violation di Postgres
    /// meng-abort transaksi, jadi tanpa ROLLBACK TO SAVEPOINT percobaan
    /// berikutnya langsung ditolak (25P02). Error lain (termasuk exclusion
    /// constraint) langsung diteruskan.
    async fn insert_with_kode_retry(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        mut data: NewReservation,
    ) -> AppResult<Reservation> {
        for _ in 0..KODE_BOOKING_MAX_RETRY {
            data.kode_booking = generate_kode_booking();

            sqlx::query("SAVEPOINT kode_booking")
                .execute(tx.as_mut())
                .await?;

            match self.reservations.insert(tx.as_mut(), &data).await {
                Ok(reservation) => return Ok(reservation),
                Err(e) if is_unique_violation(&e, "reservations_kode_booking_key") => {
                    sqlx::query("ROLLBACK TO SAVEPOINT kode_booking")
                        .execute(tx.as_mut())
                        .await?;
                }
                Err(e) => return Err(AppError::from(e)),
            }
        }

        Err(AppError::Internal(
            "Gagal menghasilkan kode booking unik.".to_string(),
        ))
    }

    /// Batalkan pesanan. Pelanggan hanya boleh membatalkan pesanannya sendiri
    /// yang masih pending; staf boleh membatalkan apa pun yang belum selesai.
    /// Membatalkan pesanan yang sudah batal adalah no-op.
    pub async fn cancel(&self, id: Uuid, actor: &AuthUser) -> AppResult<Reservation> {
        let pesanan = self.must_find(id).await?;

        let is_owner = match actor.role {
            Role::Admin => true,
            Role::Customer => {
                let customer = self
                    .customers
                    .find_by_user_id(actor.user_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Forbidden("Profil pelanggan belum terdaftar.".to_string())
                    })?;
                customer.id == pesanan.customer_id
            }
        };

        match cancel_guard(pesanan.status, actor.role, is_owner)? {
            CancelAction::SudahBatal => return Ok(pesanan),
            CancelAction::Batalkan => {}
        }

        let updated = self
            .reservations
            .update_status(id, ReservationStatus::Batal)
            .await?;

        self.notify_status(&updated).await;
        Ok(updated)
    }

    /// Admin menyetujui pesanan pending
    pub async fn confirm(&self, id: Uuid) -> AppResult<Reservation> {
        let pesanan = self.must_find(id).await?;

        if pesanan.status.is_terminal() {
            return Err(AppError::InvalidState {
                current: pesanan.status.as_str().to_string(),
                message: "Pesanan sudah selesai atau batal.".to_string(),
            });
        }

        let updated = self
            .reservations
            .update_status(id, ReservationStatus::Konfirmasi)
            .await?;

        self.notify_status(&updated).await;
        Ok(updated)
    }

    /// Serah terima unit: konfirmasi -> aktif
    pub async fn activate(&self, id: Uuid) -> AppResult<Reservation> {
        let pesanan = self.must_find(id).await?;

        if pesanan.status != ReservationStatus::Konfirmasi {
            return Err(AppError::InvalidState {
                current: pesanan.status.as_str().to_string(),
                message: "Hanya pesanan terkonfirmasi yang bisa diaktifkan.".to_string(),
            });
        }

        self.reservations
            .update_status(id, ReservationStatus::Aktif)
            .await
    }

    /// Pengembalian unit: aktif -> selesai, dengan denda keterlambatan bila
    /// dikembalikan melewati tanggal selesai.
    pub async fn complete(
        &self,
        id: Uuid,
        tanggal_kembali: Option<NaiveDate>,
    ) -> AppResult<(Reservation, Option<String>)> {
        let pesanan = self.must_find(id).await?;

        if pesanan.status != ReservationStatus::Aktif {
            return Err(AppError::InvalidState {
                current: pesanan.status.as_str().to_string(),
                message: "Hanya pesanan aktif yang bisa diselesaikan.".to_string(),
            });
        }

        let vehicle = self
            .vehicles
            .find_by_id(pesanan.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mobil tidak ditemukan.".to_string()))?;

        let kembali = tanggal_kembali.unwrap_or_else(|| Utc::now().date_naive());
        let (denda, info) = late_fee(
            pesanan.tanggal_selesai,
            kembali,
            vehicle.harga_per_hari,
            self.config.late_fee_multiplier,
        );

        let catatan = match (&pesanan.catatan, &info) {
            (Some(lama), Some(baru)) => Some(format!("{}\n{}", lama, baru)),
            (None, Some(baru)) => Some(baru.clone()),
            (lama, None) => lama.clone(),
        };

        let updated = self.reservations.complete(id, denda, catatan).await?;

        self.notify_status(&updated).await;
        Ok((updated, info))
    }

    /// Dipanggil service pembayaran saat pembayaran diverifikasi lunas.
    /// Pesanan non-terminal naik ke konfirmasi; pesanan terminal dibiarkan
    /// (pembayaran telat atas pesanan yang terlanjur batal).
    pub async fn on_payment_verified(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let pesanan = self.must_find(id).await?;

        let Some(next) = transition_on_paid(pesanan.status) else {
            if pesanan.status.is_terminal() {
                log::warn!(
                    "⚠️ Pembayaran lunas untuk pesanan {} yang sudah {}, status tidak diubah",
                    pesanan.kode_booking,
                    pesanan.status.as_str()
                );
            }
            return Ok(None);
        };

        let updated = self.reservations.update_status(id, next).await?;

        self.notify_status(&updated).await;
        Ok(Some(updated))
    }

    /// Dipanggil service pembayaran saat bukti bayar ditolak. Konfirmasi
    /// yang bersandar pada pembayaran itu diturunkan kembali ke pending.
    pub async fn on_payment_rejected(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        let pesanan = self.must_find(id).await?;

        let Some(next) = transition_on_rejected(pesanan.status) else {
            return Ok(None);
        };

        let updated = self.reservations.update_status(id, next).await?;

        Ok(Some(updated))
    }

    /// Batalkan massal pesanan pending/konfirmasi yang tanggal mulainya
    /// sudah lewat. Dipanggil task periodik.
    pub async fn sweep_expired(&self) -> AppResult<u64> {
        let dibatalkan = self
            .reservations
            .sweep_expired(Utc::now().date_naive())
            .await?;

        if dibatalkan > 0 {
            log::info!("🧹 Sweep: {} pesanan kedaluwarsa dibatalkan", dibatalkan);
        }

        Ok(dibatalkan)
    }

    pub async fn list(&self, status: Option<ReservationStatus>) -> AppResult<Vec<Reservation>> {
        self.reservations.list_all(status).await
    }

    /// Daftar pesanan milik pelanggan yang sedang login
    pub async fn list_mine(&self, user_id: Uuid) -> AppResult<Vec<Reservation>> {
        let customer = self
            .customers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Profil pelanggan belum terdaftar.".to_string())
            })?;

        self.reservations.list_by_customer(customer.id).await
    }

    /// Detail pesanan dengan kontrol kepemilikan: admin bebas, pelanggan
    /// hanya pesanannya sendiri.
    pub async fn get(&self, id: Uuid, actor: &AuthUser) -> AppResult<Reservation> {
        let pesanan = self.must_find(id).await?;

        if actor.role == Role::Customer {
            let customer = self
                .customers
                .find_by_user_id(actor.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Forbidden("Profil pelanggan belum terdaftar.".to_string())
                })?;

            if customer.id != pesanan.customer_id {
                return Err(AppError::Forbidden(
                    "Pesanan ini bukan milik Anda.".to_string(),
                ));
            }
        }

        Ok(pesanan)
    }

    /// Lengkapi pesanan dengan nama mobil, nama pelanggan, dan link WA admin
    pub async fn to_response(&self, pesanan: Reservation) -> AppResult<ReservationResponse> {
        let vehicle = self
            .vehicles
            .find_by_id(pesanan.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mobil tidak ditemukan.".to_string()))?;

        let customer = self
            .customers
            .find_by_id(pesanan.customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pelanggan tidak ditemukan.".to_string()))?;

        let link_wa = self
            .notifications
            .link_wa_konfirmasi(&pesanan, &vehicle.nama_mobil, &customer.nama);

        Ok(ReservationResponse {
            reservation: pesanan,
            nama_mobil: vehicle.nama_mobil,
            nama_pelanggan: customer.nama,
            link_wa,
        })
    }

    /// Admin menandai link WA konfirmasi sudah dikirim
    pub async fn mark_wa_sent(&self, id: Uuid) -> AppResult<Reservation> {
        self.must_find(id).await?;
        self.reservations.mark_wa_sent(id).await
    }

    pub fn repository(&self) -> &ReservationRepository {
        &self.reservations
    }

    async fn must_find(&self, id: Uuid) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pesanan tidak ditemukan.".to_string()))
    }

    /// Email perubahan status; kegagalan lookup hanya masuk log, transisi
    /// status tidak boleh gagal gara-gara notifikasi.
    async fn notify_status(&self, pesanan: &Reservation) {
        let vehicle = self.vehicles.find_by_id(pesanan.vehicle_id).await;
        let customer = self.customers.find_by_id(pesanan.customer_id).await;

        match (vehicle, customer) {
            (Ok(Some(vehicle)), Ok(Some(customer))) => {
                self.notifications.notify_status_change(
                    pesanan,
                    &vehicle.nama_mobil,
                    &customer.nama,
                    customer.email.as_deref(),
                );
            }
            _ => log::warn!(
                "⚠️ Notifikasi status {} dilewati, data mobil/pelanggan tidak lengkap",
                pesanan.kode_booking
            ),
        }
    }
}

/// Hasil keputusan pembatalan
#[derive(Debug, PartialEq, Eq)]
enum CancelAction {
    /// Sudah batal, kembalikan apa adanya (idempoten)
    SudahBatal,
    Batalkan,
}

/// Keputusan pembatalan, murni dari status dan siapa yang meminta.
/// Kepemilikan dicek paling awal: pelanggan lain tidak boleh bisa menebak
/// status pesanan orang lewat respons endpoint batal.
fn cancel_guard(
    status: ReservationStatus,
    role: Role,
    is_owner: bool,
) -> AppResult<CancelAction> {
    if role == Role::Customer && !is_owner {
        return Err(AppError::Forbidden(
            "Pesanan ini bukan milik Anda.".to_string(),
        ));
    }

    match status {
        ReservationStatus::Batal => Ok(CancelAction::SudahBatal),
        ReservationStatus::Selesai => Err(AppError::InvalidState {
            current: status.as_str().to_string(),
            message: "Pesanan yang sudah selesai tidak bisa dibatalkan.".to_string(),
        }),
        ReservationStatus::Pending => Ok(CancelAction::Batalkan),
        _ if role == Role::Customer => Err(AppError::InvalidState {
            current: status.as_str().to_string(),
            message: "Pesanan yang sudah diproses hanya bisa dibatalkan admin.".to_string(),
        }),
        _ => Ok(CancelAction::Batalkan),
    }
}

/// Status tujuan saat pembayaran lunas. None berarti dibiarkan: pesanan
/// aktif tidak disentuh, pesanan terminal dibiarkan apa adanya.
fn transition_on_paid(status: ReservationStatus) -> Option<ReservationStatus> {
    match status {
        ReservationStatus::Pending | ReservationStatus::Konfirmasi => {
            Some(ReservationStatus::Konfirmasi)
        }
        _ => None,
    }
}

/// Penolakan bukti bayar hanya menurunkan konfirmasi kembali ke pending
fn transition_on_rejected(status: ReservationStatus) -> Option<ReservationStatus> {
    (status == ReservationStatus::Konfirmasi).then_some(ReservationStatus::Pending)
}

/// Denda keterlambatan: hari telat x tarif harian mobil x multiplier.
/// Mengembalikan juga catatan yang ditempel ke pesanan.
fn late_fee(
    tanggal_selesai: NaiveDate,
    tanggal_kembali: NaiveDate,
    harga_per_hari: Decimal,
    multiplier: Decimal,
) -> (Decimal, Option<String>) {
    let hari_telat = (tanggal_kembali - tanggal_selesai).num_days();
    if hari_telat <= 0 {
        return (Decimal::ZERO, None);
    }

    let denda = Decimal::from(hari_telat) * harga_per_hari * multiplier;
    let info = format!(
        "Terlambat {} hari, denda Rp {}.",
        hari_telat, denda
    );

    (denda, Some(info))
}

/// Kode booking acak: TRX- diikuti 6 karakter A-Z0-9
pub fn generate_kode_booking() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();

    let suffix: String = (0..6)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();

    format!("TRX-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    #[test]
    fn test_kode_booking_format() {
        for _ in 0..50 {
            let kode = generate_kode_booking();
            assert_eq!(kode.len(), 10);
            assert!(kode.starts_with("TRX-"));
            assert!(kode[4..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_late_fee_on_time_is_zero() {
        let (denda, info) = late_fee(d(10), d(10), Decimal::from(300_000), Decimal::ONE);
        assert_eq!(denda, Decimal::ZERO);
        assert!(info.is_none());
    }

    #[test]
    fn test_late_fee_early_return_is_zero() {
        let (denda, _) = late_fee(d(10), d(8), Decimal::from(300_000), Decimal::ONE);
        assert_eq!(denda, Decimal::ZERO);
    }

    #[test]
    fn test_late_fee_two_days() {
        let (denda, info) = late_fee(d(10), d(12), Decimal::from(300_000), Decimal::ONE);
        assert_eq!(denda, Decimal::from(600_000));
        assert!(info.unwrap().contains("Terlambat 2 hari"));
    }

    #[test]
    fn test_late_fee_respects_multiplier() {
        let multiplier = Decimal::new(15, 1); // 1.5
        let (denda, _) = late_fee(d(10), d(11), Decimal::from(200_000), multiplier);
        assert_eq!(denda, Decimal::from(300_000));
    }

    #[test]
    fn test_cancel_batal_idempoten() {
        assert_eq!(
            cancel_guard(ReservationStatus::Batal, Role::Admin, true).unwrap(),
            CancelAction::SudahBatal
        );
        assert_eq!(
            cancel_guard(ReservationStatus::Batal, Role::Customer, true).unwrap(),
            CancelAction::SudahBatal
        );
    }

    #[test]
    fn test_cancel_selesai_ditolak() {
        let err = cancel_guard(ReservationStatus::Selesai, Role::Admin, true).unwrap_err();
        assert!(matches!(err, AppError::InvalidState { .. }));
    }

    #[test]
    fn test_cancel_bukan_pemilik_selalu_forbidden() {
        // Termasuk pesanan batal/selesai: status pesanan orang lain tidak
        // boleh bocor lewat respons endpoint batal
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Konfirmasi,
            ReservationStatus::Aktif,
            ReservationStatus::Selesai,
            ReservationStatus::Batal,
        ] {
            let err = cancel_guard(status, Role::Customer, false).unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)));
        }
    }

    #[test]
    fn test_cancel_customer_hanya_pending() {
        assert_eq!(
            cancel_guard(ReservationStatus::Pending, Role::Customer, true).unwrap(),
            CancelAction::Batalkan
        );

        for status in [ReservationStatus::Konfirmasi, ReservationStatus::Aktif] {
            let err = cancel_guard(status, Role::Customer, true).unwrap_err();
            assert!(matches!(err, AppError::InvalidState { .. }));
        }
    }

    #[test]
    fn test_cancel_admin_boleh_semua_non_terminal() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Konfirmasi,
            ReservationStatus::Aktif,
        ] {
            assert_eq!(
                cancel_guard(status, Role::Admin, true).unwrap(),
                CancelAction::Batalkan
            );
        }
    }

    #[test]
    fn test_transisi_pembayaran_lunas() {
        assert_eq!(
            transition_on_paid(ReservationStatus::Pending),
            Some(ReservationStatus::Konfirmasi)
        );
        assert_eq!(
            transition_on_paid(ReservationStatus::Konfirmasi),
            Some(ReservationStatus::Konfirmasi)
        );
        assert_eq!(transition_on_paid(ReservationStatus::Aktif), None);
        assert_eq!(transition_on_paid(ReservationStatus::Selesai), None);
        assert_eq!(transition_on_paid(ReservationStatus::Batal), None);
    }

    #[test]
    fn test_transisi_bukti_bayar_ditolak() {
        assert_eq!(
            transition_on_rejected(ReservationStatus::Konfirmasi),
            Some(ReservationStatus::Pending)
        );
        assert_eq!(transition_on_rejected(ReservationStatus::Pending), None);
        assert_eq!(transition_on_rejected(ReservationStatus::Aktif), None);
        assert_eq!(transition_on_rejected(ReservationStatus::Batal), None);
    }
}
