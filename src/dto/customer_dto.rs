use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_nik;

// Profil pelanggan: register sendiri atau dicatat admin untuk walk-in
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub nama: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub no_hp: String,
    pub alamat: Option<String>,
    #[validate(custom = "validate_nik")]
    pub ktp: Option<String>,
    pub foto_ktp_base64: Option<String>,
}
