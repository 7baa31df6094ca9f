// storefront_app/src/templates.rs

use tera::Tera;

pub const INDEX: &str = "index.html";

/// Templates are compiled into the binary; autoescaping applies since the name ends in `.html`.
pub fn load() -> tera::Result<Tera> {
  let mut tera = Tera::default();
  tera.add_raw_templates(vec![(INDEX, include_str!("../templates/index.html"))])?;
  Ok(tera)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn index_template_parses() {
    let tera = load().unwrap();
    assert!(tera.get_template_names().any(|name| name == INDEX));
  }
}
