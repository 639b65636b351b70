mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::{create_pool, run_migrations};
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use services::reservation_service::ReservationService;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(if std::env::var("RUST_LOG").is_ok() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!("🚗 Rental Mobil - Backend Booking");
    info!("=================================");

    let config = EnvironmentConfig::default();

    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Gagal konek ke database: {}", e);
            return Err(anyhow::anyhow!("Database error: {}", e));
        }
    };

    run_migrations(&pool).await?;
    info!("✅ Migrasi database selesai");

    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app_state = AppState::new(pool, config.clone());

    // Task periodik: batalkan pesanan pending/konfirmasi yang tanggal
    // mulainya sudah lewat tanpa pembayaran
    spawn_sweep_task(app_state.clone());

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/mobil", routes::mobil_routes::create_mobil_router())
        .nest("/api/supir", routes::supir_routes::create_supir_router())
        .nest("/api/promo", routes::promo_routes::create_promo_router())
        .nest(
            "/api/pelanggan",
            routes::pelanggan_routes::create_pelanggan_router(),
        )
        .nest("/api/pesanan", routes::pesanan_routes::create_pesanan_router())
        .nest(
            "/api/pembayaran",
            routes::pembayaran_routes::create_pembayaran_router(),
        )
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Server jalan di http://{}", addr);
    info!("🔍 Endpoint utama:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/mobil - Katalog mobil");
    info!("   GET  /api/mobil/rekomendasi - Mobil pilihan homepage");
    info!("   GET  /api/mobil/:id/tanggal-terblokir - Kalender ketersediaan");
    info!("   GET  /api/pesanan/cek-ketersediaan - Mobil kosong per rentang tanggal");
    info!("   POST /api/pesanan - Booking online");
    info!("   POST /api/pesanan/offline - Booking walk-in (admin)");
    info!("   POST /api/pesanan/:id/konfirmasi|aktifkan|selesai|batal - Transisi status");
    info!("   POST /api/pembayaran - Upload bukti transfer");
    info!("   POST /api/pembayaran/:id/verifikasi|tolak - Verifikasi admin");
    info!("   GET  /api/promo/cek-kode - Validasi kode promo");
    info!("   POST /api/pelanggan - Daftar profil pelanggan");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server berhenti");
    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "rental-booking",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn spawn_sweep_task(state: AppState) {
    let interval_secs = state.config.sweep_interval_secs;

    tokio::spawn(async move {
        let service = ReservationService::new(&state);
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

        loop {
            interval.tick().await;
            if let Err(e) = service.sweep_expired().await {
                error!("❌ Sweep periodik gagal: {}", e);
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C diterima, mematikan server...");
        },
        _ = terminate => {
            info!("🛑 Sinyal terminate diterima, mematikan server...");
        },
    }
}
