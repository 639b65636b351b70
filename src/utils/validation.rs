//! Utilitas validasi
//!
//! Helper validasi data identitas untuk derive `validator`.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // NIK KTP Indonesia: wajib 16 digit angka.
    static ref NIK_RE: Regex = Regex::new(r"^\d{16}$").unwrap();
}

/// Validasi NIK sesuai format KTP (16 digit)
pub fn validate_nik(value: &str) -> Result<(), ValidationError> {
    if !NIK_RE.is_match(value) {
        let mut error = ValidationError::new("nik");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validasi string tidak kosong
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_nik() {
        assert!(validate_nik("1471012345678901").is_ok());
        assert!(validate_nik("12345").is_err());
        assert!(validate_nik("14710123456789AB").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("isi").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
