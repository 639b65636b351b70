//! Model data
//!
//! Struct yang memetakan langsung ke schema PostgreSQL, berikut
//! enum status sebagai tipe ENUM Postgres.

pub mod customer;
pub mod driver;
pub mod payment;
pub mod promo;
pub mod reservation;
pub mod vehicle;
