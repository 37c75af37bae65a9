use docsign_core::Config;
use docsign_infra::{init_telemetry, LogFormat};

// Use mimalloc as the global allocator for better performance and lower fragmentation,
// especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration (also loads .env)
    let config = Config::from_env()?;

    let log_format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());
    init_telemetry(log_format)?;

    // Initialize the application (storage, repository, services, routes)
    let (_state, router) = docsign_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    docsign_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
