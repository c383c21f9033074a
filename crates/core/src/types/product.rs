//! Catalog products.
//!
//! A product exists in two shapes:
//!
//! - [`ProductRecord`] mirrors the `products` row. Price columns are
//!   `NUMERIC` and are selected as decimal strings (`price::text`).
//! - [`Product`] is what the JSON API returns, with prices as numbers and
//!   camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::numeric::{number_to_numeric, numeric_to_number};

/// Errors converting between [`ProductRecord`] and [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductConversionError {
    #[error("invalid product data: price is null or not a number for product ID {0}")]
    InvalidPrice(ProductId),
    #[error("invalid product data: price cannot be converted to database format for product ID {0}")]
    UnrepresentablePrice(ProductId),
}

/// A `products` row with `NUMERIC` columns as decimal strings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Option<String>,
    pub offer_price: Option<String>,
    pub quality: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub main_image_url: String,
    pub gallery_images_urls: Option<Vec<String>>,
    pub youtube_video_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product as served to the storefront and the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub offer_price: Option<f64>,
    pub quality: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub main_image_url: String,
    pub gallery_images_urls: Option<Vec<String>>,
    pub youtube_video_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The main image followed by the gallery, in display order.
    #[must_use]
    pub fn images(&self) -> Vec<&str> {
        std::iter::once(self.main_image_url.as_str())
            .chain(
                self.gallery_images_urls
                    .iter()
                    .flatten()
                    .map(String::as_str),
            )
            .collect()
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductConversionError;

    /// The base price is required. An unreadable offer price is dropped.
    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = numeric_to_number(record.price.as_deref())
            .ok_or(ProductConversionError::InvalidPrice(record.id))?;
        let offer_price = numeric_to_number(record.offer_price.as_deref());

        Ok(Self {
            id: record.id,
            name: record.name,
            brand: record.brand,
            price,
            offer_price,
            quality: record.quality,
            size: record.size,
            color: record.color,
            description: record.description,
            main_image_url: record.main_image_url,
            gallery_images_urls: record.gallery_images_urls,
            youtube_video_url: record.youtube_video_url,
            is_available: record.is_available,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl TryFrom<&Product> for ProductRecord {
    type Error = ProductConversionError;

    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        let price = number_to_numeric(Some(product.price).filter(|p| p.is_finite()))
            .ok_or(ProductConversionError::UnrepresentablePrice(product.id))?;
        let offer_price = number_to_numeric(product.offer_price.filter(|p| p.is_finite()));

        Ok(Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: Some(price),
            offer_price,
            quality: product.quality.clone(),
            size: product.size.clone(),
            color: product.color.clone(),
            description: product.description.clone(),
            main_image_url: product.main_image_url.clone(),
            gallery_images_urls: product.gallery_images_urls.clone(),
            youtube_video_url: product.youtube_video_url.clone(),
            is_available: product.is_available,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}
