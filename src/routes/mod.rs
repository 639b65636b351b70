pub mod mobil_routes;
pub mod pelanggan_routes;
pub mod pembayaran_routes;
pub mod pesanan_routes;
pub mod promo_routes;
pub mod supir_routes;
