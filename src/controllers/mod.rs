pub mod customer_controller;
pub mod driver_controller;
pub mod payment_controller;
pub mod promo_controller;
pub mod reservation_controller;
pub mod vehicle_controller;
