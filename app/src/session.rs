// storefront_app/src/session.rs

//! Visitor sessions. Each session owns one `Storefront`; a cart lives exactly
//! as long as its session does.

use crate::errors::AppError;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, HttpResponseBuilder};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use storefront::{Catalog, Storefront};
use tracing::{debug, info};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "storefront_session";
pub const SESSION_HEADER: &str = "X-Session-ID";

/// The session a request belongs to.
///
/// Taken from the `X-Session-ID` header, then the session cookie. A request
/// carrying neither (or an unparsable id) starts a new session; `is_new`
/// tells the handler to set the cookie on its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId {
  pub id: Uuid,
  pub is_new: bool,
}

impl SessionId {
  pub fn cookie(&self) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, self.id.to_string())
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .finish()
  }

  /// Echoes the id on the response and, for a new session, sets the cookie.
  pub fn apply(&self, builder: &mut HttpResponseBuilder) {
    builder.insert_header((SESSION_HEADER, self.id.to_string()));
    if self.is_new {
      builder.cookie(self.cookie());
    }
  }

  fn from_request_parts(req: &HttpRequest) -> Self {
    let from_header = req
      .headers()
      .get(SESSION_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| Uuid::parse_str(value.trim()).ok());
    let from_cookie = || {
      req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    };

    match from_header.or_else(from_cookie) {
      Some(id) => SessionId { id, is_new: false },
      None => {
        let id = Uuid::new_v4();
        debug!(session_id = %id, "No valid session id on request; starting a new session.");
        SessionId { id, is_new: true }
      }
    }
  }
}

impl FromRequest for SessionId {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    futures_util::future::ready(Ok(SessionId::from_request_parts(req)))
  }
}

/// Bounds on how many sessions are kept and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
  /// A session not seen for this long is dropped along with its cart.
  pub idle_ttl: Duration,
  /// Creating a session beyond this evicts the least recently seen one.
  pub max_sessions: usize,
}

impl Default for SessionLimits {
  fn default() -> Self {
    Self {
      idle_ttl: Duration::from_secs(30 * 60),
      max_sessions: 10_000,
    }
  }
}

struct SessionEntry {
  storefront: Arc<Storefront>,
  last_seen: Instant,
}

/// All live sessions, keyed by session id. Sessions are never persisted.
///
/// Idle sessions expire after `SessionLimits::idle_ttl`; expired entries are
/// swept whenever a session is created and by `sweep`. The registry never
/// holds more than `SessionLimits::max_sessions` entries.
pub struct SessionRegistry {
  catalog: Arc<dyn Catalog>,
  limits: SessionLimits,
  sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionRegistry {
  pub fn with_limits(catalog: Arc<dyn Catalog>, limits: SessionLimits) -> Self {
    Self {
      catalog,
      limits: SessionLimits {
        max_sessions: limits.max_sessions.max(1),
        ..limits
      },
      sessions: Mutex::new(HashMap::new()),
    }
  }

  pub fn limits(&self) -> SessionLimits {
    self.limits
  }

  /// The storefront for `session`, created empty on first use or after it expired.
  pub fn storefront(&self, session: &SessionId) -> Arc<Storefront> {
    self.storefront_at(session, Instant::now())
  }

  fn storefront_at(&self, session: &SessionId, now: Instant) -> Arc<Storefront> {
    let mut sessions = self.sessions.lock();

    if let Some(entry) = sessions.get_mut(&session.id) {
      if now.saturating_duration_since(entry.last_seen) < self.limits.idle_ttl {
        entry.last_seen = now;
        return Arc::clone(&entry.storefront);
      }
      debug!(session_id = %session.id, "Session expired; starting over with an empty cart.");
      sessions.remove(&session.id);
    }

    self.evict(&mut sessions, now);
    let storefront = Arc::new(Storefront::new(Arc::clone(&self.catalog)));
    sessions.insert(
      session.id,
      SessionEntry {
        storefront: Arc::clone(&storefront),
        last_seen: now,
      },
    );
    info!(session_id = %session.id, live_sessions = sessions.len(), "Session started.");
    storefront
  }

  /// Drops every session idle for longer than the TTL. Returns how many were dropped.
  pub fn sweep(&self) -> usize {
    self.sweep_at(Instant::now())
  }

  fn sweep_at(&self, now: Instant) -> usize {
    let mut sessions = self.sessions.lock();
    let before = sessions.len();
    self.drop_expired(&mut sessions, now);
    before - sessions.len()
  }

  fn drop_expired(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
    let idle_ttl = self.limits.idle_ttl;
    sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < idle_ttl);
  }

  /// Makes room for one more session.
  fn evict(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
    self.drop_expired(sessions, now);
    while sessions.len() >= self.limits.max_sessions {
      let Some(oldest) = sessions.iter().min_by_key(|(_, entry)| entry.last_seen).map(|(id, _)| *id) else {
        break;
      };
      sessions.remove(&oldest);
      debug!(session_id = %oldest, "Evicted least recently seen session.");
    }
  }

  pub fn len(&self) -> usize {
    self.sessions.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
