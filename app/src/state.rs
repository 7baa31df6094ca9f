// storefront_app/src/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::session::SessionRegistry;
use crate::templates;
use std::sync::Arc;
use storefront::Catalog;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
  pub sessions: Arc<SessionRegistry>,
  pub templates: Arc<Tera>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires a fresh session registry over `catalog` and loads the page templates.
  pub fn new(config: AppConfig, catalog: Arc<dyn Catalog>) -> Result<Self> {
    Ok(Self {
      sessions: Arc::new(SessionRegistry::with_limits(catalog, config.sessions)),
      templates: Arc::new(templates::load()?),
      config: Arc::new(config),
    })
  }
}
