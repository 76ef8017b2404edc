use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wholesale_recon::{
    backend::HttpBackendClient,
    config::{Config, ServerConfig},
    health,
    matching::{self, MatchingService},
    middleware::{json_error_handler, ErrorLogger, RequestId},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(&config);

    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting Wholesale Reconciliation Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let backend = HttpBackendClient::new(&config.backend).context("Failed to create backend client")?;
    tracing::info!(
        "Backend client initialized ({}, timeout {}s, {} retries)",
        config.backend.normalized_base_url(),
        config.backend.timeout_secs,
        config.backend.max_retries
    );

    let service = web::Data::new(MatchingService::new(Arc::new(backend), config.matching));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(ErrorLogger)
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(cors(&server_config))
            .configure(health::configure)
            .configure(matching::configure)
            .route("/", web::get().to(index))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("wholesale_recon={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.app.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600);

    match &server.cors_allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors,
    }
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Wholesale Reconciliation Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
