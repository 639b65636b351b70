//! Business logic
//!
//! Lima komponen inti (pricing, availability, promo, pesanan, pembayaran)
//! plus kolaborator eksternal (notifikasi, blob store).

pub mod availability_service;
pub mod notification_service;
pub mod payment_service;
pub mod pricing_service;
pub mod promo_service;
pub mod reservation_service;
pub mod storage_service;
