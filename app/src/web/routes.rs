// storefront_app/src/web/routes.rs

use crate::web::handlers::{cart_handlers, page_handlers, product_handlers};
use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  // The page and its form posts
  cfg
    .route("/", web::get().to(page_handlers::page_handler))
    .service(
      web::scope("/cart")
        .route("/{product_id}/add", web::post().to(page_handlers::add_item_form_handler))
        .route(
          "/{product_id}/quantity",
          web::post().to(page_handlers::update_quantity_form_handler),
        )
        .route("/{product_id}/remove", web::post().to(page_handlers::remove_item_form_handler)),
    )
    .service(
      web::scope("/modal")
        .route("/add", web::post().to(page_handlers::modal_add_handler))
        .route("/close", web::post().to(page_handlers::modal_close_handler)),
    );

  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/categories", web::get().to(product_handlers::list_categories_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::get_cart_handler))
          .route("/items", web::post().to(cart_handlers::add_to_cart_handler))
          .service(
            web::resource("/items/{product_id}")
              .route(web::patch().to(cart_handlers::update_quantity_handler))
              .route(web::delete().to(cart_handlers::remove_item_handler)),
          ),
      ),
  );
}
