use anyhow::Context;
use storefront_storage::{DataStore, backend::rest::RestConfig};
use storefront_web::{app, config::Config, middleware::session::AdminPassphrases, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting storefront");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Using table service at: {}", config.supabase_url);
    let rest_config = RestConfig::new(&config.supabase_url, &config.supabase_key)
        .with_timeout(config.backend_timeout);
    let store = DataStore::connect(&rest_config).context("Failed to initialize table client")?;

    let passphrases = AdminPassphrases::from_comma_separated(&config.admin_passphrases);
    if passphrases.is_open() {
        tracing::warn!("ADMIN_PASSPHRASES is empty, any passphrase opens the admin panel");
    }

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app(AppState::new(store, passphrases)))
        .await
        .context("Server error")?;

    Ok(())
}
