use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vehicle_catalog::cache::{build_cache_store, CacheAside, CacheConfig};
use vehicle_catalog::config::EnvironmentConfig;
use vehicle_catalog::create_app;
use vehicle_catalog::database::create_pool;
use vehicle_catalog::repositories::PgVehicleStore;
use vehicle_catalog::services::VehicleService;
use vehicle_catalog::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG o info por defecto)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Vehicle Catalog - API de consulta");
    info!("====================================");

    let config = EnvironmentConfig::from_env().map_err(|e| {
        error!("❌ Configuración inválida: {}", e);
        anyhow::anyhow!("Configuración inválida: {}", e)
    })?;

    // Inicializar base de datos
    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Inicializar cache
    let cache_config = CacheConfig::default();
    let cache_store = build_cache_store(&config.cache, &cache_config).await;
    let cache_backend = cache_store.backend_name();
    let cache = CacheAside::new(cache_store, cache_config.ttl);

    let service = VehicleService::with_store(
        Arc::new(PgVehicleStore::new(pool)),
        cache,
        config.query_timeout,
    );

    let app = create_app(AppState::new(service, cache_backend), &config.cors_origins);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/search - Buscar vehículos (query string)");
    info!("   POST /api/vehicles/search - Buscar vehículos (JSON)");
    info!("   GET  /api/brands, /api/vehicle-types, /api/fuel-types, /api/transmissions");
    info!("   GET  /api/filters - Vocabulario de filtros");
    info!("💾 Cache: {}", cache_backend);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
