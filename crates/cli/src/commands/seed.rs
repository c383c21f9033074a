//! Seed the catalog from a YAML file.
//!
//! The file holds a `products` list whose entries use the same camelCase
//! fields as `POST /_api/admin/products`:
//!
//! ```yaml
//! products:
//!   - name: Air Runner
//!     brand: Nike
//!     price: 4999
//!     offerPrice: 3999
//!     quality: 10A
//!     size: 9A
//!     mainImageUrl: https://cdn.example.com/air-runner.jpg
//! ```
//!
//! Every entry is validated before the database is touched.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use champ_storefront::db::ProductRepository;
use champ_storefront::models::product::{CreateProductRequest, NewProduct};

/// Top-level layout of a product seed file.
#[derive(Debug, Deserialize)]
pub struct ProductSeedFile {
    pub products: Vec<CreateProductRequest>,
}

/// Validate every entry, reporting all failures by position.
///
/// # Errors
///
/// Returns one message per invalid entry.
pub fn validate_products(file: ProductSeedFile) -> Result<Vec<NewProduct>, Vec<String>> {
    let mut valid = Vec::with_capacity(file.products.len());
    let mut errors = Vec::new();

    for (index, request) in file.products.into_iter().enumerate() {
        let name = request.name.clone();
        match request.validate() {
            Ok(product) => valid.push(product),
            Err(e) => errors.push(format!("products[{index}] ({name}): {e}")),
        }
    }

    if errors.is_empty() { Ok(valid) } else { Err(errors) }
}

/// Seed products from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `clear_existing` - If true, delete every existing product first
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any entry fails
/// validation, or a database operation fails.
pub async fn products(
    file_path: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");

    // Parse and validate before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let file: ProductSeedFile = serde_yaml::from_str(&content)?;
    info!(products = file.products.len(), "Parsed seed file");

    let products = match validate_products(file) {
        Ok(products) => products,
        Err(errors) => {
            error!("Seed file validation failed:");
            for err in &errors {
                error!("  - {err}");
            }
            return Err(format!("{} validation errors found", errors.len()).into());
        }
    };

    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);

    if clear_existing {
        let deleted = repo.delete_all().await?;
        info!(deleted, "Cleared existing products");
    }

    for product in &products {
        let created = repo.create(product).await?;
        info!(id = %created.id, name = %created.name, "Inserted product");
    }

    info!("Seeding complete!");
    info!("  Products inserted: {}", products.len());

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SEED: &str = r"
products:
  - name: Air Runner
    brand: Nike
    price: 4999
    offerPrice: 3999.5
    quality: 10A
    size: 9A
    galleryImagesUrls:
      - https://cdn.example.com/a.jpg
    mainImageUrl: https://cdn.example.com/air-runner.jpg
  - name: Court Classic
    brand: Puma
    price: 2599
    quality: 10A
    mainImageUrl: https://cdn.example.com/court.jpg
";

    #[test]
    fn test_parses_and_validates_seed_file() {
        let file: ProductSeedFile = serde_yaml::from_str(SEED).unwrap();
        let products = validate_products(file).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Air Runner");
        assert_eq!(products[0].offer_price, Some(3999.5));
        assert_eq!(products[0].size.as_deref(), Some("9A"));
        assert_eq!(products[1].offer_price, None);
        assert_eq!(products[1].gallery_images_urls, None);
    }

    #[test]
    fn test_reports_every_invalid_entry() {
        let yaml = r"
products:
  - name: ok
    brand: Nike
    price: 10
    quality: 10A
    mainImageUrl: https://cdn.example.com/x.jpg
  - name: Valid Name
    brand: Nike
    price: -1
    quality: 10A
    mainImageUrl: not a url
";
        let file: ProductSeedFile = serde_yaml::from_str(yaml).unwrap();
        let errors = validate_products(file).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("products[0] (ok): "));
        assert!(errors[1].starts_with("products[1] (Valid Name): "));
    }

    #[test]
    fn test_missing_required_field_fails_to_parse() {
        let yaml = "products:\n  - name: No Price\n    brand: Nike\n";
        assert!(serde_yaml::from_str::<ProductSeedFile>(yaml).is_err());
    }
}
