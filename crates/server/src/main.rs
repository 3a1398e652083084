//! Merchant assistant server entry point

use std::net::SocketAddr;
use std::sync::Arc;

use assistant_agent::{OrchestratorConfig, ResponseOrchestrator};
use assistant_config::{load_settings, BrandProfile, Settings};
use assistant_knowledge::{
    seed, InMemoryEngine, KnowledgeStore, QdrantEngine, QdrantEngineConfig, SimilarityEngine,
};
use assistant_language::{IntentClassifier, LanguageDetector};
use assistant_llm::OpenAiBackend;
use assistant_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("ASSISTANT_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!("Warning: failed to load config: {}. Using defaults.", e);
            Settings::default()
        },
    };

    init_tracing();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?settings.environment,
        "Starting merchant assistant server"
    );

    // Language understanding services
    let detector = Arc::new(LanguageDetector::with_builtin_profiles(
        settings.language.default_language.clone(),
    ));
    let classifier = Arc::new(IntentClassifier::new());

    // Knowledge store over the external similarity engine, with an
    // in-memory fallback so development works without a running Qdrant.
    let engine = init_engine(&settings).await;
    let knowledge = Arc::new(KnowledgeStore::new(engine));
    match seed::load_core_knowledge(&knowledge).await {
        Ok(added) => tracing::info!(added, "Core knowledge ready"),
        Err(e) => tracing::warn!(error = %e, "Core knowledge load failed (non-fatal)"),
    }

    // The LLM credential check happens here; a misconfigured backend must
    // refuse to serve turns rather than fail mid-conversation.
    let backend = match OpenAiBackend::from_settings(&settings.llm) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            tracing::error!(
                error = %e,
                "LLM backend configuration invalid. Set ASSISTANT__LLM__API_KEY and restart."
            );
            std::process::exit(1);
        },
    };

    let orchestrator = Arc::new(ResponseOrchestrator::new(
        detector,
        classifier,
        knowledge,
        backend,
        BrandProfile::default(),
        OrchestratorConfig {
            default_language: settings.language.default_language.clone(),
            confidence_threshold: settings.language.confidence_threshold,
            max_knowledge_results: 3,
        },
    )?);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    let state = AppState::new(settings, orchestrator);
    let app = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing with env-filter; RUST_LOG overrides the default level.
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "assistant=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect to Qdrant, falling back to the in-memory engine when unreachable.
async fn init_engine(settings: &Settings) -> Arc<dyn SimilarityEngine> {
    let config = QdrantEngineConfig {
        endpoint: settings.knowledge.endpoint.clone(),
        collection: settings.knowledge.collection.clone(),
        vector_dim: settings.knowledge.vector_dim,
        api_key: settings.knowledge.api_key.clone(),
    };

    match QdrantEngine::new(config) {
        Ok(engine) => match engine.ensure_collection().await {
            Ok(()) => {
                tracing::info!(
                    endpoint = %settings.knowledge.endpoint,
                    collection = %settings.knowledge.collection,
                    "Similarity engine ready"
                );
                return Arc::new(engine);
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Qdrant unreachable, falling back to in-memory engine"
                );
            },
        },
        Err(e) => {
            tracing::warn!(error = %e, "Qdrant client failed, falling back to in-memory engine");
        },
    }

    Arc::new(InMemoryEngine::new())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
