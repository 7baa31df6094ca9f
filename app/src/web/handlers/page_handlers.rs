// storefront_app/src/web/handlers/page_handlers.rs

//! The server-rendered storefront page and the form posts its buttons make.
//!
//! Catalog failures on this surface never turn into error responses: a failed
//! product listing shows the "failed to load" placeholder, everything else
//! (categories, trending, the detail view, add-to-cart lookups) is logged and
//! left out of the page.

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use storefront::view::{CartView, CategoryBar, GridView, NoticeView, ProductDetail};
use storefront::{CategoryFilter, ProductId};
use tracing::{error, info, instrument};

use crate::errors::AppError;
use crate::session::SessionId;
use crate::state::AppState;
use crate::templates;

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
  pub category: Option<String>,
  pub product: Option<u64>,
  pub cart: Option<String>,
}

impl PageQuery {
  pub fn filter(&self) -> CategoryFilter {
    CategoryFilter::from(self.category.clone())
  }

  pub fn cart_open(&self) -> bool {
    self.cart.as_deref() == Some("open")
  }
}

#[derive(Serialize, Debug)]
pub struct PageSection {
  pub title: &'static str,
  pub grid: GridView,
}

/// Everything the index template renders.
#[derive(Serialize, Debug)]
pub struct PageView {
  /// `None` when the categories could not be loaded; the page then has no filter bar.
  pub categories: Option<CategoryBar>,
  pub category: String,
  pub sections: Vec<PageSection>,
  pub cart: CartView,
  pub cart_open: bool,
  pub detail: Option<ProductDetail>,
  pub notices: Vec<NoticeView>,
  /// Where form posts on this page redirect back to.
  pub return_to: String,
}

#[instrument(name = "handler::page", skip(app_state, req, query), fields(session_id = %session.id))]
pub async fn page_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query: web::Query<PageQuery>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let shop = app_state.sessions.storefront(&session);
  let filter = query.filter();

  let (categories, trending, products) = tokio::join!(
    shop.load_categories(),
    shop.load_trending(app_state.config.trending_limit),
    shop.load_products(filter.clone()),
  );

  let categories = match categories {
    Ok(names) => Some(CategoryBar::new(&names, &filter)),
    Err(e) => {
      error!(error = %e, "Error fetching categories.");
      None
    }
  };

  let mut sections = Vec::with_capacity(2);
  match trending {
    Ok(products) if !products.is_empty() => sections.push(PageSection {
      title: "Trending",
      grid: GridView::from_products(&products),
    }),
    Ok(_) => {}
    Err(e) => error!(error = %e, "Error fetching trending products."),
  }
  if let Err(e) = &products {
    error!(error = %e, "Error fetching products.");
  }
  sections.push(PageSection {
    title: "Products",
    grid: GridView::from_result(&products),
  });

  let detail = match query.product {
    Some(id) => match shop.open_product(ProductId(id)).await {
      Ok(product) => Some(ProductDetail::from(&product)),
      Err(e) => {
        error!(error = %e, product_id = id, "Error fetching product details.");
        None
      }
    },
    None => {
      shop.close_product();
      None
    }
  };

  let view = PageView {
    categories,
    category: filter.as_str().to_string(),
    sections,
    cart: CartView::from(&shop.cart()),
    cart_open: query.cart_open(),
    detail,
    notices: shop.take_notices().iter().map(NoticeView::from).collect(),
    return_to: req
      .uri()
      .path_and_query()
      .map(|pq| pq.as_str().to_string())
      .unwrap_or_else(|| "/".to_string()),
  };

  let mut context = tera::Context::new();
  context.insert("page", &view);
  let body = app_state.templates.render(templates::INDEX, &context)?;

  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  Ok(response.content_type("text/html; charset=utf-8").body(body))
}

#[derive(Deserialize, Debug, Default)]
pub struct ReturnForm {
  pub return_to: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct QuantityForm {
  pub delta: i64,
  pub return_to: Option<String>,
}

/// Only same-site paths are accepted as redirect targets.
///
/// Browsers drop tabs and newlines from URLs and treat `\` like `/`, so a
/// target holding any of those (or any other whitespace or control
/// character) could turn into `//host` and is rejected outright.
pub fn return_target(return_to: Option<&str>) -> &str {
  match return_to {
    Some(target) if is_local_path(target) => target,
    _ => "/",
  }
}

fn is_local_path(target: &str) -> bool {
  target.starts_with('/')
    && !target.starts_with("//")
    && !target
      .chars()
      .any(|c| c == '\\' || c.is_whitespace() || c.is_control())
}

fn see_other(return_to: Option<&str>, session: &SessionId) -> HttpResponse {
  let mut response = HttpResponse::SeeOther();
  session.apply(&mut response);
  response
    .insert_header((header::LOCATION, return_target(return_to)))
    .finish()
}

#[instrument(name = "handler::add_item_form", skip(app_state, form), fields(session_id = %session.id))]
pub async fn add_item_form_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  form: web::Form<ReturnForm>,
  session: SessionId,
) -> HttpResponse {
  let product_id = ProductId(path.into_inner());
  let shop = app_state.sessions.storefront(&session);
  match shop.add_item(product_id).await {
    Ok(outcome) => info!(%product_id, quantity = outcome.quantity, "Item added to cart."),
    Err(e) => error!(error = %e, %product_id, "Error adding item to cart."),
  }
  see_other(form.return_to.as_deref(), &session)
}

#[instrument(name = "handler::update_quantity_form", skip(app_state, form), fields(session_id = %session.id))]
pub async fn update_quantity_form_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  form: web::Form<QuantityForm>,
  session: SessionId,
) -> HttpResponse {
  let product_id = ProductId(path.into_inner());
  let change = app_state
    .sessions
    .storefront(&session)
    .update_quantity(product_id, form.delta);
  info!(%product_id, delta = form.delta, ?change, "Cart quantity changed.");
  see_other(form.return_to.as_deref(), &session)
}

#[instrument(name = "handler::remove_item_form", skip(app_state, form), fields(session_id = %session.id))]
pub async fn remove_item_form_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  form: web::Form<ReturnForm>,
  session: SessionId,
) -> HttpResponse {
  let product_id = ProductId(path.into_inner());
  let removed = app_state.sessions.storefront(&session).remove_item(product_id);
  info!(%product_id, removed, "Cart line removed.");
  see_other(form.return_to.as_deref(), &session)
}

#[instrument(name = "handler::modal_add", skip(app_state, form), fields(session_id = %session.id))]
pub async fn modal_add_handler(
  app_state: web::Data<AppState>,
  form: web::Form<ReturnForm>,
  session: SessionId,
) -> HttpResponse {
  let shop = app_state.sessions.storefront(&session);
  match shop.add_selected().await {
    Ok(Some(outcome)) => info!(product_id = %outcome.product_id, "Selected product added to cart."),
    Ok(None) => info!("Add from detail view with nothing selected."),
    Err(e) => error!(error = %e, "Error adding selected product to cart."),
  }
  see_other(form.return_to.as_deref(), &session)
}

pub async fn modal_close_handler(
  app_state: web::Data<AppState>,
  form: web::Form<ReturnForm>,
  session: SessionId,
) -> HttpResponse {
  app_state.sessions.storefront(&session).close_product();
  see_other(form.return_to.as_deref(), &session)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn return_target_rejects_offsite_paths() {
    assert_eq!(return_target(Some("/?category=jewelery&cart=open")), "/?category=jewelery&cart=open");
    assert_eq!(return_target(Some("//evil.example")), "/");
    assert_eq!(return_target(Some("https://evil.example")), "/");
    assert_eq!(return_target(None), "/");
  }

  #[test]
  fn return_target_rejects_paths_browsers_would_rewrite() {
    assert_eq!(return_target(Some("/\t/evil.example")), "/");
    assert_eq!(return_target(Some("/\n/evil.example")), "/");
    assert_eq!(return_target(Some("/\r\n/evil.example")), "/");
    assert_eq!(return_target(Some("/\\evil.example")), "/");
    assert_eq!(return_target(Some("/ /evil.example")), "/");
    assert_eq!(return_target(Some("/\u{0}/evil.example")), "/");
    assert_eq!(return_target(Some("/?category=men%27s%20clothing")), "/?category=men%27s%20clothing");
  }

  #[test]
  fn page_query_defaults() {
    let query = PageQuery::default();
    assert!(query.filter().is_all());
    assert!(!query.cart_open());
  }
}
