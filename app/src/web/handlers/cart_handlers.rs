// storefront_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use storefront::view::format_price;
use storefront::store::{ADDED_TO_CART, QUANTITY_UPDATED};
use storefront::{ProductId, QuantityChange, Storefront};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct AddToCartRequestPayload {
  pub product_id: u64,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityRequestPayload {
  pub delta: i64,
}

fn cart_body(shop: &Storefront) -> Value {
  let cart = shop.cart();
  let total = cart.total_price();
  json!({
    "lines": cart.lines(),
    "count": cart.total_count(),
    "total": total,
    "total_label": format_price(total),
  })
}

#[instrument(name = "handler::get_cart", skip(app_state), fields(session_id = %session.id))]
pub async fn get_cart_handler(app_state: web::Data<AppState>, session: SessionId) -> HttpResponse {
  let shop = app_state.sessions.storefront(&session);
  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  response.json(cart_body(&shop))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, req_payload),
  fields(session_id = %session.id, product_id = req_payload.product_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let shop = app_state.sessions.storefront(&session);
  let outcome = shop.add_item(ProductId(req_payload.product_id)).await.map_err(|e| {
    warn!(error = %e, "Add to cart failed.");
    AppError::from(e)
  })?;
  info!(quantity = outcome.quantity, source = ?outcome.source, "Add to cart successful.");
  let message = if outcome.is_new_line() { ADDED_TO_CART } else { QUANTITY_UPDATED };

  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  Ok(response.json(json!({
    "message": message,
    "outcome": outcome,
    "cart": cart_body(&shop),
  })))
}

#[instrument(name = "handler::update_quantity", skip(app_state), fields(session_id = %session.id))]
pub async fn update_quantity_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  req_payload: web::Json<UpdateQuantityRequestPayload>,
  session: SessionId,
) -> Result<HttpResponse, AppError> {
  let product_id = ProductId(path.into_inner());
  let shop = app_state.sessions.storefront(&session);
  let change = shop.update_quantity(product_id, req_payload.delta);
  if change == QuantityChange::Missing {
    return Err(AppError::NotFound(format!("No cart line for product {}", product_id)));
  }
  info!(?change, "Cart quantity updated.");

  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  Ok(response.json(json!({
    "change": change,
    "cart": cart_body(&shop),
  })))
}

/// Removing a product that is not in the cart is not an error.
#[instrument(name = "handler::remove_item", skip(app_state), fields(session_id = %session.id))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<u64>,
  session: SessionId,
) -> HttpResponse {
  let shop = app_state.sessions.storefront(&session);
  let removed = shop.remove_item(ProductId(path.into_inner()));

  let mut response = HttpResponse::Ok();
  session.apply(&mut response);
  response.json(json!({
    "removed": removed,
    "cart": cart_body(&shop),
  }))
}
