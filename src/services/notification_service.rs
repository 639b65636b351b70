//! Notifikasi keluar
//!
//! Email dikirim lewat kolaborator webhook eksternal, selalu fire-and-forget:
//! kegagalan hanya dicatat di log, tidak pernah membatalkan transaksi
//! pesanan/pembayaran. Link WhatsApp konfirmasi dibangun di sini juga.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::utils::errors::{AppError, AppResult};

/// Kolaborator pengiriman pesan
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Implementasi via HTTP webhook mail service
pub struct WebhookMailer {
    client: Client,
    webhook_url: Option<String>,
}

impl WebhookMailer {
    pub fn new(client: Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| AppError::ExternalApi("MAIL_WEBHOOK_URL belum diset".to_string()))?;

        let response = self
            .client
            .post(url)
            .json(&json!({ "to": to, "subject": subject, "body": body }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Gagal kirim email: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Mail webhook menjawab {}",
                response.status()
            )));
        }

        Ok(())
    }
}

pub struct NotificationService {
    notifier: Arc<dyn Notifier>,
    admin_email: String,
    admin_wa_number: String,
}

impl NotificationService {
    pub fn new(client: Client, config: &EnvironmentConfig) -> Self {
        Self {
            notifier: Arc::new(WebhookMailer::new(client, config.mail_webhook_url.clone())),
            admin_email: config.admin_email.clone(),
            admin_wa_number: config.admin_wa_number.clone(),
        }
    }

    #[cfg(test)]
    pub fn with_notifier(notifier: Arc<dyn Notifier>, admin_email: &str, admin_wa: &str) -> Self {
        Self {
            notifier,
            admin_email: admin_email.to_string(),
            admin_wa_number: admin_wa.to_string(),
        }
    }

    /// Kirim tanpa menunggu; error cuma masuk log
    fn fire_and_forget(&self, to: String, subject: String, body: String) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.send_email(&to, &subject, &body).await {
                log::warn!("⚠️ Notifikasi ke {} gagal: {}", to, e);
            }
        });
    }

    /// Order online baru: email admin + email "menunggu konfirmasi" ke customer
    pub fn notify_new_order(
        &self,
        pesanan: &Reservation,
        nama_mobil: &str,
        nama_customer: &str,
        email_customer: Option<&str>,
    ) {
        self.fire_and_forget(
            self.admin_email.clone(),
            format!("🔔 Pesanan Baru: {}", pesanan.kode_booking),
            format!(
                "Halo Admin,\nAda pesanan baru masuk!\n\nKode: {}\nMobil: {}\nCustomer: {}\nTotal: Rp {}\n\nCek dashboard sekarang.",
                pesanan.kode_booking, nama_mobil, nama_customer, pesanan.harga_total
            ),
        );

        if let Some(email) = email_customer {
            self.fire_and_forget(
                email.to_string(),
                format!("⏳ Menunggu Konfirmasi: {}", pesanan.kode_booking),
                format!(
                    "Halo {},\n\nPesanan sewa mobil Anda telah kami terima.\nStatus saat ini: MENUNGGU KONFIRMASI ADMIN.\n\nDetail:\nMobil: {}\nTanggal: {} s/d {}\nTotal: Rp {}\n\nKami akan segera menghubungi Anda setelah mengecek ketersediaan unit.",
                    nama_customer,
                    nama_mobil,
                    pesanan.tanggal_mulai,
                    pesanan.tanggal_selesai,
                    pesanan.harga_total
                ),
            );
        }
    }

    /// Email perubahan status ke customer (konfirmasi/batal/selesai)
    pub fn notify_status_change(
        &self,
        pesanan: &Reservation,
        nama_mobil: &str,
        nama_customer: &str,
        email_customer: Option<&str>,
    ) {
        let Some(email) = email_customer else {
            return;
        };

        let (subject, mut message) = match pesanan.status {
            ReservationStatus::Konfirmasi => (
                format!("✅ Booking Disetujui: {}", pesanan.kode_booking),
                format!(
                    "Halo {}, Booking Anda DISETUJUI! Silakan ambil unit {} sesuai jadwal.",
                    nama_customer, nama_mobil
                ),
            ),
            ReservationStatus::Batal => (
                format!("❌ Booking Dibatalkan: {}", pesanan.kode_booking),
                format!(
                    "Halo {}, Mohon maaf booking Anda dibatalkan. Hubungi admin untuk info lebih lanjut.",
                    nama_customer
                ),
            ),
            ReservationStatus::Selesai => (
                format!("👋 Pesanan Selesai: {}", pesanan.kode_booking),
                "Terima kasih telah menggunakan jasa kami. Pesanan selesai.".to_string(),
            ),
            // Status lain tidak punya template email
            ReservationStatus::Pending | ReservationStatus::Aktif => return,
        };

        if pesanan.status == ReservationStatus::Selesai && pesanan.denda > Decimal::ZERO {
            message.push_str(&format!(
                "\n\nCatatan: Terdapat denda keterlambatan sebesar Rp {}.",
                pesanan.denda
            ));
        }

        self.fire_and_forget(email.to_string(), subject, message);
    }

    /// Link wa.me berisi ringkasan pesanan untuk konfirmasi manual ke admin.
    /// Sapaan dibedakan corporate vs personal.
    pub fn link_wa_konfirmasi(
        &self,
        pesanan: &Reservation,
        nama_mobil: &str,
        nama_customer: &str,
    ) -> String {
        let penyewa = if pesanan.is_corporate {
            pesanan.perusahaan_nama.as_deref().unwrap_or(nama_customer)
        } else {
            nama_customer
        };

        let message = format!(
            "Halo Admin, konfirmasi pesanan baru:\n\nKode: *{}*\nPenyewa: {}\nUnit: {}\nTgl: {} s/d {}\nTotal: Rp {}\n",
            pesanan.kode_booking,
            penyewa,
            nama_mobil,
            pesanan.tanggal_mulai,
            pesanan.tanggal_selesai,
            pesanan.harga_total
        );

        format!(
            "https://wa.me/{}?text={}",
            self.admin_wa_number,
            urlencoding::encode(&message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ReservationChannel;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn pesanan_contoh() -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            kode_booking: "TRX-AB12CD".to_string(),
            customer_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            driver_id: None,
            promo_id: None,
            tanggal_mulai: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            tanggal_selesai: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            total_hari: 3,
            harga_total: Decimal::from(450_000),
            denda: Decimal::ZERO,
            status: ReservationStatus::Pending,
            type_pesanan: ReservationChannel::Online,
            catatan: None,
            bukti_ktp_url: None,
            is_corporate: false,
            perusahaan_nama: None,
            perusahaan_npwp: None,
            perusahaan_alamat: None,
            perusahaan_pic: None,
            perusahaan_pic_kontak: None,
            wa_sent_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct NopNotifier;

    #[async_trait]
    impl Notifier for NopNotifier {
        async fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> AppResult<()> {
            Ok(())
        }
    }

    fn service() -> NotificationService {
        NotificationService::with_notifier(Arc::new(NopNotifier), "admin@rental.local", "628123")
    }

    #[test]
    fn test_wa_link_encodes_message() {
        let link = service().link_wa_konfirmasi(&pesanan_contoh(), "Avanza", "Budi");

        assert!(link.starts_with("https://wa.me/628123?text="));
        assert!(link.contains("TRX-AB12CD"));
        // Spasi dan newline harus ter-encode
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn test_wa_link_uses_company_name_for_corporate() {
        let mut pesanan = pesanan_contoh();
        pesanan.is_corporate = true;
        pesanan.perusahaan_nama = Some("PT Maju Jaya".to_string());

        let link = service().link_wa_konfirmasi(&pesanan, "Avanza", "Budi");
        assert!(link.contains(&*urlencoding::encode("PT Maju Jaya")));
    }
}
