//! Request/response DTO per resource

pub mod common;
pub mod customer_dto;
pub mod driver_dto;
pub mod payment_dto;
pub mod promo_dto;
pub mod reservation_dto;
pub mod vehicle_dto;
