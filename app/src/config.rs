// storefront_app/src/config.rs

use crate::errors::{AppError, Result};
use crate::session::SessionLimits;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use storefront::DEFAULT_API_BASE;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Base URL of the REST catalog, e.g. `https://fakestoreapi.com`.
  pub catalog_api_base: String,
  /// How many products the trending strip shows.
  pub trending_limit: usize,
  /// Per-request catalog timeout. `None` waits indefinitely.
  pub catalog_timeout: Option<Duration>,
  pub sessions: SessionLimits,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      catalog_api_base: DEFAULT_API_BASE.to_string(),
      trending_limit: 3,
      catalog_timeout: None,
      sessions: SessionLimits::default(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; unset variables take their defaults.
  pub fn from_lookup(get_var: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();

    let server_host = get_var("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match get_var("SERVER_PORT") {
      Some(raw) => raw
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT '{}': {}", raw, e)))?,
      None => defaults.server_port,
    };
    let catalog_api_base = get_var("CATALOG_API_BASE")
      .map(|raw| raw.trim().to_string())
      .filter(|raw| !raw.is_empty())
      .unwrap_or(defaults.catalog_api_base);
    let trending_limit = match get_var("TRENDING_LIMIT") {
      Some(raw) => raw
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid TRENDING_LIMIT '{}': {}", raw, e)))?,
      None => defaults.trending_limit,
    };
    let catalog_timeout = match get_var("CATALOG_TIMEOUT_SECS") {
      Some(raw) => {
        let secs = raw
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid CATALOG_TIMEOUT_SECS '{}': {}", raw, e)))?;
        (secs > 0).then(|| Duration::from_secs(secs))
      }
      None => defaults.catalog_timeout,
    };

    let idle_ttl = match get_var("SESSION_IDLE_SECS") {
      Some(raw) => raw
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| AppError::Config(format!("Invalid SESSION_IDLE_SECS '{}': expected a positive integer", raw)))?,
      None => defaults.sessions.idle_ttl,
    };
    let max_sessions = match get_var("MAX_SESSIONS") {
      Some(raw) => raw
        .parse::<usize>()
        .ok()
        .filter(|max| *max > 0)
        .ok_or_else(|| AppError::Config(format!("Invalid MAX_SESSIONS '{}': expected a positive integer", raw)))?,
      None => defaults.sessions.max_sessions,
    };

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      catalog_api_base,
      trending_limit,
      catalog_timeout,
      sessions: SessionLimits { idle_ttl, max_sessions },
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn defaults_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:8080");
    assert_eq!(config.catalog_api_base, "https://fakestoreapi.com");
    assert_eq!(config.trending_limit, 3);
    assert!(config.catalog_timeout.is_none());
    assert_eq!(config.sessions, SessionLimits::default());
  }

  #[test]
  fn reads_overrides() {
    let config = AppConfig::from_lookup(lookup(&[
      ("SERVER_PORT", "9090"),
      ("CATALOG_API_BASE", "http://localhost:3000"),
      ("TRENDING_LIMIT", "5"),
      ("CATALOG_TIMEOUT_SECS", "10"),
      ("SESSION_IDLE_SECS", "600"),
      ("MAX_SESSIONS", "50"),
    ]))
    .unwrap();
    assert_eq!(config.server_port, 9090);
    assert_eq!(config.catalog_api_base, "http://localhost:3000");
    assert_eq!(config.trending_limit, 5);
    assert_eq!(config.catalog_timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.sessions.idle_ttl, Duration::from_secs(600));
    assert_eq!(config.sessions.max_sessions, 50);
  }

  #[test]
  fn rejects_bad_numbers() {
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("TRENDING_LIMIT", "-1")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("MAX_SESSIONS", "0")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("SESSION_IDLE_SECS", "soon")])),
      Err(AppError::Config(_))
    ));
  }
}
