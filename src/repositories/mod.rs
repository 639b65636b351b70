//! Lapisan akses data (sqlx)

pub mod customer_repository;
pub mod driver_repository;
pub mod payment_repository;
pub mod promo_repository;
pub mod reservation_repository;
pub mod vehicle_repository;
