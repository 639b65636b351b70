//! Konfigurasi variabel environment

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Konfigurasi environment aplikasi
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,

    // Kolaborator eksternal
    pub mail_webhook_url: Option<String>,
    pub blob_store_url: Option<String>,
    pub admin_email: String,
    pub admin_wa_number: String,

    // Kebijakan denda keterlambatan: pengali atas harga sewa harian mobil.
    // Default 1.0 mengikuti kebijakan lama (denda = harga sewa per hari telat).
    pub late_fee_multiplier: Decimal,

    // Interval sweep pesanan zombie (detik)
    pub sweep_interval_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            mail_webhook_url: env::var("MAIL_WEBHOOK_URL").ok(),
            blob_store_url: env::var("BLOB_STORE_URL").ok(),
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@rental.local".to_string()),
            admin_wa_number: env::var("ADMIN_WA_NUMBER")
                .unwrap_or_else(|_| "6281365338011".to_string()),
            late_fee_multiplier: env::var("LATE_FEE_DAILY_RATE_MULTIPLIER")
                .ok()
                .and_then(|v| Decimal::from_str(&v).ok())
                .unwrap_or(Decimal::ONE),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("SWEEP_INTERVAL_SECS must be a valid number"),
        }
    }
}

impl EnvironmentConfig {
    /// Cek mode production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
