//! Product repository.
//!
//! Price columns are `NUMERIC`. They are selected as text and converted
//! with [`champ_core::numeric_to_number`], and written from text with an
//! explicit `::numeric` cast.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};

use champ_core::{
    Brand, Color, FilterError, PriceBound, PriceRange, Product, ProductId, ProductRecord, Quality,
    Size, number_to_numeric,
};

use super::RepositoryError;
use crate::models::product::{NewProduct, ProductChanges};

const PRODUCT_COLUMNS: &str = "id, name, brand, price::text AS price, \
     offer_price::text AS offer_price, quality, size, color, description, \
     main_image_url, gallery_images_urls, youtube_video_url, is_available, \
     created_at, updated_at";

/// Storefront listing filters, parsed from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub price_range: Option<PriceRange>,
    pub brand: Option<Brand>,
    pub size: Option<Size>,
    pub color: Option<Color>,
    pub quality: Option<Quality>,
    pub search: Option<String>,
}

impl ProductFilter {
    /// Parse filters from raw query parameters.
    ///
    /// Empty values count as absent and unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` for a value outside a filter's vocabulary.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, FilterError> {
        fn parse<T: std::str::FromStr<Err = FilterError>>(
            params: &HashMap<String, String>,
            key: &str,
        ) -> Result<Option<T>, FilterError> {
            params
                .get(key)
                .filter(|v| !v.is_empty())
                .map(|v| v.parse())
                .transpose()
        }

        Ok(Self {
            price_range: parse(params, PriceRange::FIELD)?,
            brand: parse(params, Brand::FIELD)?,
            size: parse(params, Size::FIELD)?,
            color: parse(params, Color::FIELD)?,
            quality: parse(params, Quality::FIELD)?,
            search: params.get("search").filter(|s| !s.is_empty()).cloned(),
        })
    }
}

/// Escape `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the listing query for `filter`.
fn listing_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(PRODUCT_COLUMNS);
    qb.push(" FROM products WHERE is_available = TRUE");

    if let Some(range) = filter.price_range {
        match range.bound() {
            PriceBound::Below(amount) => qb.push(" AND price < ").push_bind(amount),
            PriceBound::Above(amount) => qb.push(" AND price > ").push_bind(amount),
        };
    }
    if let Some(brand) = filter.brand {
        qb.push(" AND brand = ").push_bind(brand.label());
    }
    if let Some(size) = filter.size {
        qb.push(" AND size = ").push_bind(size.label());
    }
    if let Some(color) = filter.color {
        qb.push(" AND color = ").push_bind(color.label());
    }
    if let Some(quality) = filter.quality {
        qb.push(" AND quality = ").push_bind(quality.label());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR brand ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    qb.push(" ORDER BY created_at DESC");
    qb
}

/// Build the partial `UPDATE` for `changes`. `updated_at` is always bumped.
fn update_query(id: ProductId, changes: &ProductChanges) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE products SET updated_at = NOW()");

    if let Some(name) = &changes.name {
        qb.push(", name = ").push_bind(name);
    }
    if let Some(brand) = &changes.brand {
        qb.push(", brand = ").push_bind(brand);
    }
    if let Some(price) = changes.price {
        qb.push(", price = ")
            .push_bind(number_to_numeric(Some(price)))
            .push("::numeric");
    }
    if let Some(offer_price) = changes.offer_price {
        qb.push(", offer_price = ")
            .push_bind(number_to_numeric(offer_price))
            .push("::numeric");
    }
    if let Some(quality) = &changes.quality {
        qb.push(", quality = ").push_bind(quality);
    }
    if let Some(size) = &changes.size {
        qb.push(", size = ").push_bind(size);
    }
    if let Some(color) = &changes.color {
        qb.push(", color = ").push_bind(color);
    }
    if let Some(description) = &changes.description {
        qb.push(", description = ").push_bind(description);
    }
    if let Some(url) = &changes.main_image_url {
        qb.push(", main_image_url = ").push_bind(url);
    }
    if let Some(urls) = &changes.gallery_images_urls {
        qb.push(", gallery_images_urls = ").push_bind(urls);
    }
    if let Some(url) = &changes.youtube_video_url {
        qb.push(", youtube_video_url = ").push_bind(url);
    }
    if let Some(is_available) = changes.is_available {
        qb.push(", is_available = ").push_bind(is_available);
    }

    qb.push(" WHERE id = ").push_bind(id);
    qb.push(" RETURNING ");
    qb.push(PRODUCT_COLUMNS);
    qb
}

fn into_product(record: ProductRecord) -> Result<Product, RepositoryError> {
    Product::try_from(record).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List available products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row has no valid price.
    pub async fn list_available(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let records = listing_query(filter)
            .build_query_as::<ProductRecord>()
            .fetch_all(self.pool)
            .await?;

        records.into_iter().map(into_product).collect()
    }

    /// Get an available product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row has no valid price.
    pub async fn get_available(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND is_available = TRUE"
        );
        let record = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        record.map(into_product).transpose()
    }

    /// Insert a product. New products are always available.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO products (
                name, brand, price, offer_price, quality, size, color, description,
                main_image_url, gallery_images_urls, youtube_video_url, is_available,
                created_at, updated_at
            )
            VALUES ($1, $2, $3::numeric, $4::numeric, $5, $6, $7, $8, $9, $10, $11, TRUE, NOW(), NOW())
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let record = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(&product.name)
            .bind(&product.brand)
            .bind(number_to_numeric(Some(product.price)))
            .bind(number_to_numeric(product.offer_price))
            .bind(&product.quality)
            .bind(&product.size)
            .bind(&product.color)
            .bind(&product.description)
            .bind(&product.main_image_url)
            .bind(&product.gallery_images_urls)
            .bind(&product.youtube_video_url)
            .fetch_one(self.pool)
            .await?;

        into_product(record)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let record = update_query(id, changes)
            .build_query_as::<ProductRecord>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        into_product(record)
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every product. Used by the seed command.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_filter_from_query() {
        let filter = ProductFilter::from_query(&params(&[
            ("priceRange", "under-1999"),
            ("brand", "nike"),
            ("quality", "7a"),
            ("page", "2"),
        ]))
        .unwrap();

        assert_eq!(filter.price_range, Some(PriceRange::Under1999));
        assert_eq!(filter.brand, Some(Brand::Nike));
        assert_eq!(filter.quality, Some(Quality::Grade7A));
        assert_eq!(filter.size, None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn test_filter_empty_values_are_absent() {
        let filter =
            ProductFilter::from_query(&params(&[("brand", ""), ("search", "")])).unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_filter_rejects_unknown_slug() {
        let err = ProductFilter::from_query(&params(&[("priceRange", "cheap")])).unwrap_err();
        assert_eq!(err.field, "priceRange");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("air max"), "air max");
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
    }

    #[test]
    fn test_listing_query_unfiltered() {
        let qb = listing_query(&ProductFilter::default());
        let sql = qb.sql();
        assert!(sql.contains("FROM products WHERE is_available = TRUE"));
        assert!(sql.ends_with("ORDER BY created_at DESC"));
        assert!(!sql.contains("$1"));
    }

    #[test]
    fn test_listing_query_binds_every_filter() {
        let filter = ProductFilter {
            price_range: Some(PriceRange::Above2499),
            brand: Some(Brand::Adidas),
            size: Some(Size::Size9A),
            color: Some(Color::White),
            quality: Some(Quality::Grade10A),
            search: Some("samba".to_owned()),
        };
        let qb = listing_query(&filter);
        let sql = qb.sql();

        assert!(sql.contains("AND price > $1"));
        assert!(sql.contains("AND brand = $2"));
        assert!(sql.contains("AND size = $3"));
        assert!(sql.contains("AND color = $4"));
        assert!(sql.contains("AND quality = $5"));
        assert!(sql.contains("AND (name ILIKE $6 OR brand ILIKE $7)"));
        assert!(!sql.contains("samba"));
    }

    #[test]
    fn test_listing_query_under_bound_uses_less_than() {
        let filter = ProductFilter {
            price_range: Some(PriceRange::Under999),
            ..ProductFilter::default()
        };
        assert!(listing_query(&filter).sql().contains("AND price < $1"));
    }

    #[test]
    fn test_update_query_only_sets_present_fields() {
        let changes = ProductChanges {
            name: Some("Samba OG".to_owned()),
            offer_price: Some(None),
            ..ProductChanges::default()
        };
        let qb = update_query(ProductId::new(9), &changes);
        let sql = qb.sql();

        assert!(sql.starts_with("UPDATE products SET updated_at = NOW(), name = $1"));
        assert!(sql.contains("offer_price = $2::numeric"));
        assert!(sql.contains("WHERE id = $3 RETURNING id, name"));
        assert!(!sql.contains("brand ="));
    }

    #[test]
    fn test_update_query_with_no_changes_still_touches_row() {
        let changes = ProductChanges::default();
        let qb = update_query(ProductId::new(1), &changes);
        assert!(
            qb.sql()
                .starts_with("UPDATE products SET updated_at = NOW() WHERE id = $1")
        );
    }
}
