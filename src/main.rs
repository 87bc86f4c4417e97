use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use clinic_core::store::mysql;
use clinic_core::{Clinic, ClinicConfig};

/// Main entry point for the clinic service
///
/// Resolves configuration, selects the storage backend and serves the REST API.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:8080")
/// - `API_KEY`: shared secret required on every non-GET request under `/api/v1`
/// - `API_KEY_HEADER`: header carrying the secret (default: "x-api-key")
/// - `DATABASE_URL`: MySQL connection URL; when unset records are kept in memory
/// - `DATABASE_MAX_CONNECTIONS`: MySQL pool size (default: 5)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, database connection or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
                .add_directive("clinic_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClinicConfig::from_env()?;

    let clinic = match config.database_url() {
        Some(url) => {
            let pool = mysql::connect(url, config.max_connections()).await?;
            tracing::info!("++ Using MySQL storage");
            Clinic::mysql(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory and lost on exit");
            Clinic::in_memory()
        }
    };

    let rest_addr = config.rest_addr().to_owned();
    tracing::info!("++ Starting clinic REST API on {}", rest_addr);

    let app = router(AppState::new(clinic, config));
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
