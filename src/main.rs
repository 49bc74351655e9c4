use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::assistant::{Assistant, GeminiClient};
use timesheet_engine::config::ConfigLoader;
use timesheet_engine::export::{ExportWorkflow, JsonFileGenerator, SheetGenerator, SimulatedGenerator};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config_dir = env::var("TIMESHEET_CONFIG").unwrap_or_else(|_| "./config/default".to_string());
    let bind_addr = env::var("TIMESHEET_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let config = ConfigLoader::load(&config_dir).map_err(|e| e.to_string())?;
    info!(
        config_dir = %config_dir,
        period = %config.period().label(),
        employees = config.roster().len(),
        "Configuration loaded"
    );

    let export = config.export().clone();
    let generator: Arc<dyn SheetGenerator> = match &export.output_dir {
        Some(dir) => {
            info!(output_dir = %dir.display(), "Writing timesheets as JSON files");
            Arc::new(JsonFileGenerator::new(dir))
        }
        None => Arc::new(SimulatedGenerator::new(export.item_latency())),
    };
    let workflow = ExportWorkflow::new(generator, export.success_display());

    let assistant_settings = config.assistant().clone();
    if assistant_settings.api_key().is_none() {
        warn!(
            variable = %assistant_settings.api_key_env,
            "AI API key is not set, assistant answers will fall back"
        );
    }
    let client = GeminiClient::from_settings(&assistant_settings).map_err(|e| e.to_string())?;
    let assistant = Assistant::new(Arc::new(client), assistant_settings.chat_temperature);

    let app = create_router(AppState::new(config, workflow, assistant));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("failed to bind {bind_addr}: {e}"))?;
    info!(addr = %bind_addr, "Timesheet engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| e.to_string())
}
