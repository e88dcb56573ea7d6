use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chequier::api::server::start_server;
use chequier::api::types::ApiContext;
use chequier::config;
use chequier::core_state::CoreState;
use chequier::pipeline::artifacts::ArtifactStore;
use chequier::pipeline::capture::ProcessCaptureTrigger;
use chequier::pipeline::recognition::GeminiClient;
use chequier::pipeline::ScanPipeline;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Chequier starting v{}", config::APP_VERSION);

    let Some(api_key) = config::gemini_api_key() else {
        tracing::error!("GEMINI_API_KEY is not set; the recognition client cannot start");
        std::process::exit(1);
    };
    let Some(script) = config::capture_script() else {
        tracing::error!("CHEQUIER_CAPTURE_SCRIPT is not set; the capture trigger cannot start");
        std::process::exit(1);
    };

    let artifacts = ArtifactStore::new(config::scanned_dir());
    if let Err(e) = artifacts.ensure_root() {
        tracing::error!(dir = %artifacts.root().display(), error = %e, "Cannot create artifact directory");
        std::process::exit(1);
    }
    let scanned_dir = artifacts.root().to_path_buf();

    let pipeline = Arc::new(ScanPipeline::new(
        Arc::new(ProcessCaptureTrigger::for_script(&script)),
        Arc::new(GeminiClient::new(
            &config::gemini_base_url(),
            &api_key,
            config::GEMINI_MODEL,
            config::extraction_timeout_secs(),
        )),
        artifacts,
    ));

    let core = Arc::new(CoreState::new(config::ledger_path()));
    if let Ok(guard) = core.read_ledger() {
        tracing::info!(saved = guard.saved_entries().len(), "Ledger ready");
    }

    let ctx = ApiContext::new(core, pipeline);
    let mut server = match start_server(ctx, &config::bind_addr(), &scanned_dir).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start API server");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %server.addr, "Chequier listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for shutdown signal");
    }
    server.shutdown();
}
