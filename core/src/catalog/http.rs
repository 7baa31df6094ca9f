// storefront/src/catalog/http.rs

//! `Catalog` over the fakestoreapi-style REST endpoints:
//!
//! - `GET {base}/products/categories`
//! - `GET {base}/products`
//! - `GET {base}/products/category/{category}`
//! - `GET {base}/products?limit={n}`
//! - `GET {base}/products/{id}`

use super::Catalog;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{CategoryFilter, Product, ProductId};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{event, instrument, Level};

pub const DEFAULT_API_BASE: &str = "https://fakestoreapi.com";

#[derive(Debug, Clone)]
pub struct HttpCatalog {
  client: Client,
  base: Url,
}

impl HttpCatalog {
  /// Catalog client without a request timeout.
  pub fn new(base_url: &str) -> StorefrontResult<Self> {
    Self::with_timeout(base_url, None)
  }

  pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> StorefrontResult<Self> {
    let base = Url::parse(base_url)
      .map_err(|e| StorefrontError::Config(format!("Invalid catalog base URL '{}': {}", base_url, e)))?;
    if base.cannot_be_a_base() {
      return Err(StorefrontError::Config(format!(
        "Catalog base URL '{}' cannot carry a path",
        base_url
      )));
    }

    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder
      .build()
      .map_err(|e| StorefrontError::Config(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self { client, base })
  }

  pub fn base_url(&self) -> &Url {
    &self.base
  }

  /// `{base}/{segments...}`, each segment percent-encoded.
  pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    // cannot_be_a_base was rejected in the constructor
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  pub(crate) fn products_url(&self, filter: &CategoryFilter) -> Url {
    match filter {
      CategoryFilter::All => self.endpoint(&["products"]),
      CategoryFilter::Named(name) => self.endpoint(&["products", "category", name.as_str()]),
    }
  }

  pub(crate) fn trending_url(&self, limit: usize) -> Url {
    let mut url = self.endpoint(&["products"]);
    url.query_pairs_mut().append_pair("limit", &limit.to_string());
    url
  }

  async fn fetch_body(&self, url: Url) -> StorefrontResult<(String, Vec<u8>)> {
    let url_str = url.to_string();
    event!(Level::DEBUG, url = %url_str, "Catalog GET.");

    let response = self.client.get(url).send().await.map_err(|e| StorefrontError::Network {
      url: url_str.clone(),
      source: e.into(),
    })?;

    let status = response.status();
    if !status.is_success() {
      event!(Level::WARN, url = %url_str, status = status.as_u16(), "Catalog answered with non-success status.");
      return Err(StorefrontError::Status {
        url: url_str,
        status: status.as_u16(),
      });
    }

    let body = response.bytes().await.map_err(|e| StorefrontError::Network {
      url: url_str.clone(),
      source: e.into(),
    })?;
    Ok((url_str, body.to_vec()))
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> StorefrontResult<T> {
    let (url, body) = self.fetch_body(url).await?;
    decode(&url, &body)
  }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> StorefrontResult<T> {
  serde_json::from_slice(body).map_err(|e| StorefrontError::MalformedResponse {
    url: url.to_string(),
    source: e.into(),
  })
}

/// An unknown id comes back as `200` with an empty or `null` body.
fn decode_product(id: ProductId, url: &str, body: &[u8]) -> StorefrontResult<Product> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Err(StorefrontError::ProductNotFound { product_id: id });
  }
  let product: Option<Product> = decode(url, body)?;
  let product = product.ok_or(StorefrontError::ProductNotFound { product_id: id })?;
  if product.id != id {
    return Err(StorefrontError::MalformedResponse {
      url: url.to_string(),
      source: anyhow::anyhow!("requested product {} but catalog returned {}", id, product.id),
    });
  }
  Ok(product)
}

#[async_trait]
impl Catalog for HttpCatalog {
  #[instrument(name = "HttpCatalog::list_categories", skip(self), err(Display))]
  async fn list_categories(&self) -> StorefrontResult<Vec<String>> {
    self.get_json(self.endpoint(&["products", "categories"])).await
  }

  #[instrument(name = "HttpCatalog::list_products", skip(self), fields(category = %filter), err(Display))]
  async fn list_products(&self, filter: &CategoryFilter) -> StorefrontResult<Vec<Product>> {
    let products: Vec<Product> = self.get_json(self.products_url(filter)).await?;
    event!(Level::DEBUG, count = products.len(), "Products listed.");
    Ok(products)
  }

  #[instrument(name = "HttpCatalog::list_trending", skip(self), err(Display))]
  async fn list_trending(&self, limit: usize) -> StorefrontResult<Vec<Product>> {
    self.get_json(self.trending_url(limit)).await
  }

  #[instrument(name = "HttpCatalog::get_product", skip(self), fields(product_id = %id), err(Display))]
  async fn get_product(&self, id: ProductId) -> StorefrontResult<Product> {
    let id_segment = id.to_string();
    let (url, body) = self.fetch_body(self.endpoint(&["products", id_segment.as_str()])).await?;
    decode_product(id, &url, &body)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalog(base: &str) -> HttpCatalog {
    HttpCatalog::new(base).unwrap()
  }

  #[test]
  fn builds_fixed_endpoints() {
    let c = catalog(DEFAULT_API_BASE);
    assert_eq!(
      c.endpoint(&["products", "categories"]).as_str(),
      "https://fakestoreapi.com/products/categories"
    );
    assert_eq!(
      c.products_url(&CategoryFilter::All).as_str(),
      "https://fakestoreapi.com/products"
    );
    assert_eq!(c.trending_url(3).as_str(), "https://fakestoreapi.com/products?limit=3");
  }

  #[test]
  fn category_segment_is_encoded() {
    let c = catalog("http://localhost:9000/api/");
    let url = c.products_url(&CategoryFilter::from("men's clothing"));
    assert_eq!(url.as_str(), "http://localhost:9000/api/products/category/men's%20clothing");
  }

  #[test]
  fn rejects_non_base_urls() {
    assert!(matches!(HttpCatalog::new("mailto:shop@example.com"), Err(StorefrontError::Config(_))));
    assert!(matches!(HttpCatalog::new("not a url"), Err(StorefrontError::Config(_))));
  }

  #[test]
  fn empty_or_null_product_body_is_not_found() {
    let id = ProductId(99);
    assert!(matches!(
      decode_product(id, "u", b""),
      Err(StorefrontError::ProductNotFound { .. })
    ));
    assert!(matches!(
      decode_product(id, "u", b"null"),
      Err(StorefrontError::ProductNotFound { .. })
    ));
  }

  #[test]
  fn garbage_body_is_malformed() {
    let err = decode_product(ProductId(1), "u", b"<html>").unwrap_err();
    assert!(matches!(err, StorefrontError::MalformedResponse { .. }));
    assert!(err.is_catalog_failure());
  }

  #[test]
  fn mismatched_id_is_malformed() {
    let body = br#"{"id": 2, "title": "t", "price": 1.5}"#;
    assert!(matches!(
      decode_product(ProductId(1), "u", body),
      Err(StorefrontError::MalformedResponse { .. })
    ));
  }
}
