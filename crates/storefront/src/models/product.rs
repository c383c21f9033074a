//! Admin product inputs.
//!
//! Request bodies deserialize into `*Request` types, which `validate()`
//! into the types the repository accepts.

use serde::{Deserialize, Deserializer};

use champ_core::ProductId;

use crate::validation::{self, ValidationError};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /_api/admin/products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub offer_price: Option<f64>,
    pub quality: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub main_image_url: String,
    #[serde(default)]
    pub gallery_images_urls: Option<Vec<String>>,
    #[serde(default)]
    pub youtube_video_url: Option<String>,
}

/// A validated product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
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
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    validation::min_chars("name", name, 3, "Name must be at least 3 characters")
}

fn check_brand(brand: &str) -> Result<(), ValidationError> {
    validation::min_chars("brand", brand, 2, "Brand must be at least 2 characters")
}

fn check_quality(quality: &str) -> Result<(), ValidationError> {
    validation::min_chars("quality", quality, 3, "Quality must be at least 3 characters")
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    validation::positive_number("price", price, "Price must be a positive number")
}

fn check_offer_price(offer_price: f64) -> Result<(), ValidationError> {
    validation::positive_number(
        "offerPrice",
        offer_price,
        "Offer price must be a positive number",
    )
}

impl CreateProductRequest {
    /// Apply the product rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation, checked in field order.
    pub fn validate(self) -> Result<NewProduct, ValidationError> {
        check_name(&self.name)?;
        check_brand(&self.brand)?;
        check_price(self.price)?;
        if let Some(offer_price) = self.offer_price {
            check_offer_price(offer_price)?;
        }
        check_quality(&self.quality)?;
        validation::url("mainImageUrl", &self.main_image_url)?;
        if let Some(urls) = &self.gallery_images_urls {
            validation::url_list("galleryImagesUrls", urls)?;
        }
        if let Some(url) = &self.youtube_video_url {
            validation::url("youtubeVideoUrl", url)?;
        }

        Ok(NewProduct {
            name: self.name,
            brand: self.brand,
            price: self.price,
            offer_price: self.offer_price,
            quality: self.quality,
            size: self.size,
            color: self.color,
            description: self.description,
            main_image_url: self.main_image_url,
            gallery_images_urls: self.gallery_images_urls,
            youtube_video_url: self.youtube_video_url,
        })
    }
}

/// Body of `POST /_api/admin/product/update`.
///
/// Nullable columns use `Option<Option<_>>`: absent leaves the column alone,
/// `null` clears it. A `null` on a required column is treated as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub offer_price: Option<Option<f64>>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub size: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub main_image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub gallery_images_urls: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub youtube_video_url: Option<Option<String>>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub offer_price: Option<Option<f64>>,
    pub quality: Option<String>,
    pub size: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub main_image_url: Option<String>,
    pub gallery_images_urls: Option<Option<Vec<String>>>,
    pub youtube_video_url: Option<Option<String>>,
    pub is_available: Option<bool>,
}

impl UpdateProductRequest {
    /// Apply the product rules to every field that is present.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation, starting with the id.
    pub fn validate(self) -> Result<(ProductId, ProductChanges), ValidationError> {
        let id = ProductId::new(validation::positive_id("id", self.id)?);

        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(brand) = &self.brand {
            check_brand(brand)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(Some(offer_price)) = self.offer_price {
            check_offer_price(offer_price)?;
        }
        if let Some(quality) = &self.quality {
            check_quality(quality)?;
        }
        if let Some(url) = &self.main_image_url {
            validation::url("mainImageUrl", url)?;
        }
        if let Some(Some(urls)) = &self.gallery_images_urls {
            validation::url_list("galleryImagesUrls", urls)?;
        }
        if let Some(Some(url)) = &self.youtube_video_url {
            validation::url("youtubeVideoUrl", url)?;
        }

        Ok((
            id,
            ProductChanges {
                name: self.name,
                brand: self.brand,
                price: self.price,
                offer_price: self.offer_price,
                quality: self.quality,
                size: self.size,
                color: self.color,
                description: self.description,
                main_image_url: self.main_image_url,
                gallery_images_urls: self.gallery_images_urls,
                youtube_video_url: self.youtube_video_url,
                is_available: self.is_available,
            },
        ))
    }
}

/// Body of `POST /_api/admin/product/delete`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteProductRequest {
    pub id: i64,
}

impl DeleteProductRequest {
    /// # Errors
    ///
    /// Returns `ValidationError::Field` unless the id is a positive integer.
    pub fn validate(self) -> Result<ProductId, ValidationError> {
        Ok(ProductId::new(validation::positive_id("id", self.id)?))
    }
}
