use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::driver::DriverStatus;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
    #[validate(length(min = 5, max = 20))]
    pub no_hp: String,
    pub harga_per_hari: Option<Decimal>,
    pub foto_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDriverRequest {
    pub nama: Option<String>,
    pub no_hp: Option<String>,
    pub harga_per_hari: Option<Decimal>,
    pub status: Option<DriverStatus>,
    pub foto_base64: Option<String>,
}
