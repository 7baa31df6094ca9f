// storefront_app/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use storefront::{Catalog, HttpCatalog};
use storefront_app::{configure_app_routes, AppConfig, AppState};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let catalog: Arc<dyn Catalog> =
    match HttpCatalog::with_timeout(&app_config.catalog_api_base, app_config.catalog_timeout) {
      Ok(catalog) => {
        tracing::info!(base_url = %catalog.base_url(), "Catalog client ready.");
        Arc::new(catalog)
      }
      Err(e) => {
        tracing::error!(error = %e, "Failed to build the catalog client.");
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
      }
    };

  let server_address = app_config.bind_address();
  let app_state = match AppState::new(app_config, catalog) {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load page templates.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  // Idle sessions are also dropped whenever a new one starts; this catches quiet periods.
  let sessions = Arc::clone(&app_state.sessions);
  actix_web::rt::spawn(async move {
    let mut tick = tokio::time::interval(sessions.limits().idle_ttl);
    loop {
      tick.tick().await;
      let dropped = sessions.sweep();
      if dropped > 0 {
        tracing::info!(dropped, live_sessions = sessions.len(), "Swept idle sessions.");
      }
    }
  });

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
