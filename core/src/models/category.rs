// storefront/src/models/category.rs

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which slice of the catalog a product listing asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
  #[default]
  All,
  Named(String),
}

impl CategoryFilter {
  pub const ALL: &'static str = "all";

  pub fn as_str(&self) -> &str {
    match self {
      CategoryFilter::All => Self::ALL,
      CategoryFilter::Named(name) => name,
    }
  }

  pub fn is_all(&self) -> bool {
    matches!(self, CategoryFilter::All)
  }
}

impl From<String> for CategoryFilter {
  fn from(value: String) -> Self {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL) {
      CategoryFilter::All
    } else {
      CategoryFilter::Named(trimmed.to_string())
    }
  }
}

impl From<&str> for CategoryFilter {
  fn from(value: &str) -> Self {
    CategoryFilter::from(value.to_string())
  }
}

impl From<Option<String>> for CategoryFilter {
  fn from(value: Option<String>) -> Self {
    value.map(CategoryFilter::from).unwrap_or_default()
  }
}

impl From<CategoryFilter> for String {
  fn from(filter: CategoryFilter) -> Self {
    filter.as_str().to_string()
  }
}

impl FromStr for CategoryFilter {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(CategoryFilter::from(s))
  }
}

impl fmt::Display for CategoryFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
