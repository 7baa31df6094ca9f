// storefront_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use storefront::{CategoryFilter, ProductId};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<String>,
  /// When set, returns the first `limit` products (the trending list) instead of a category listing.
  pub limit: Option<usize>,
}

#[instrument(name = "handler::list_categories", skip(app_state), fields(session_id = %session.id))]
pub async fn list_categories_handler(
  app_state: web::Data<AppState>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let categories = app_state.sessions.storefront(&session).load_categories().await?;
  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  Ok(response.json(categories))
}

/// Lists products. A category listing becomes the session's product snapshot;
/// a `limit` listing does not.
#[instrument(name = "handler::list_products", skip(app_state), fields(session_id = %session.id))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListProductsQuery>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let query = query.into_inner();
  let shop = app_state.sessions.storefront(&session);

  let products = match query.limit {
    Some(0) => return Err(AppError::Validation("limit must be at least 1".to_string())),
    Some(limit) => shop.load_trending(limit).await?,
    None => shop.load_products(CategoryFilter::from(query.category)).await?,
  };
  info!(count = products.len(), "Products listed.");

  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  Ok(response.json(products))
}

/// Fetches one product and makes it the session's selected product.
#[instrument(name = "handler::get_product", skip(app_state), fields(session_id = %session.id))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .sessions
    .storefront(&session)
    .open_product(ProductId(path.into_inner()))
    .await?;

  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  Ok(response.json(product))
}
