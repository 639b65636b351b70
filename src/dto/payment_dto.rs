use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::payment::{PaymentMethod, PaymentStatus};

// Pelanggan upload bukti transfer, admin bisa mencatat cash
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub reservation_id: Uuid,
    pub jumlah: Option<Decimal>,
    pub metode: Option<PaymentMethod>,
    pub bukti_bayar_base64: Option<String>,
    pub bukti_bayar_url: Option<String>,
    pub catatan_admin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct RejectPaymentRequest {
    pub catatan_admin: Option<String>,
}
