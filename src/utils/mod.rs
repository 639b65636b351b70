//! Utilitas sistem
//!
//! Penanganan error dan helper validasi yang dipakai lintas modul.

pub mod errors;
pub mod validation;
