//! LearnFlow relay server binary.

use anyhow::Context;
use clap::Parser;
use learnflow_config::RelayConfig;
use learnflow_context::{CourseCatalog, NavigationMap, PromptComposer};
use learnflow_core::{AllowListAuthorizer, ChatOrchestrator, RelayServices};
use learnflow_gateway::{GeminiGateway, GenerationOptions, TextGenerator};
use learnflow_server::{AppState, cors_layer, router};
use learnflow_tools::{FileScanner, ResourceIndex, provider_from_config};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the relay server.
#[derive(Parser)]
#[command(name = "learnflow-server", version)]
struct Cli {
    /// Optional path to a learnflow.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let mut config = if let Some(path) = cli.config.as_ref() {
        RelayConfig::load_from_path(path).context("failed to load config")?
    } else {
        RelayConfig::default()
    };
    config.apply_env_overrides();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate().context("invalid config")?;

    let api_key = config
        .llm
        .api_key
        .clone()
        .context("an LLM credential is required (llm.api_key or GEMINI_API_KEY)")?;

    let catalog = match config.resources.courses_path.as_ref() {
        Some(path) => CourseCatalog::load_from_path(path).context("failed to load courses")?,
        None => CourseCatalog::default_catalog(),
    };
    let navigation = match config.resources.navigation_path.as_ref() {
        Some(path) => {
            NavigationMap::load_from_path(path).context("failed to load navigation map")?
        }
        None => NavigationMap::default_map(),
    };
    info!(
        "context tables ready (courses={}, environment={})",
        catalog.len(),
        config.server.environment.as_str()
    );

    let index = Arc::new(ResourceIndex::build(&config.resources.root));
    let generator: Arc<dyn TextGenerator> =
        Arc::new(GeminiGateway::new(api_key, config.llm.model.clone()));
    let search = provider_from_config(&config.search);

    let services = RelayServices {
        composer: PromptComposer::new(Arc::new(catalog), Arc::new(navigation)),
        index,
        generator,
        search,
        authorizer: Arc::new(AllowListAuthorizer::new(
            config.admin.allowed_identities.clone(),
        )),
        scanner: FileScanner::default(),
        generation: GenerationOptions {
            temperature: config.llm.temperature,
            max_output_tokens: config.llm.max_output_tokens,
        },
        scan_root: PathBuf::from(&config.resources.scan_root),
    };
    let orchestrator = ChatOrchestrator::new(services, &config.rate_limit);
    let state = Arc::new(AppState {
        orchestrator,
        environment: config.server.environment,
    });

    let app = router(state).layer(cors_layer(
        config.server.environment,
        &config.server.allowed_origins,
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("relay listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
