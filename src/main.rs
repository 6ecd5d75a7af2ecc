use short_url::{config, server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    telemetry::init_tracing(&config);
    config.print_summary();

    if !config.is_auth_enabled() {
        tracing::warn!(
            "BASIC_AUTH_USERNAME or BASIC_AUTH_PASSWORD is not set; the admin pages and API are unauthenticated"
        );
    }

    server::run(config).await
}
