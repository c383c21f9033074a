//! Public catalog route handlers.

use std::collections::HashMap;

use axum::{Json, extract::State, http::Uri};
use serde::Serialize;
use tracing::instrument;

use champ_core::{Product, ProductId};

use crate::db::settings::WHATSAPP_NUMBER;
use crate::db::{ProductFilter, ProductRepository, SettingsRepository};
use crate::error::{AppError, Result, ResultExt};
use crate::state::AppState;
use crate::validation::{ValidationError, coerce_positive_id, parse_query};

const LIST_CONTEXT: &str = "Failed to fetch products";
const SHOW_CONTEXT: &str = "Failed to fetch product";

/// Response for `GET /_api/products`.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Response for `GET /_api/product`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product: Product,
    /// WhatsApp deep link, or `null` when no contact number is configured.
    pub buy_url: Option<String>,
}

/// Build the "Buy Now via WhatsApp" link for a product.
///
/// wa.me only accepts digits, so spaces, dashes and a leading `+` are
/// dropped. Returns `None` if nothing is left.
#[must_use]
pub fn whatsapp_link(number: Option<&str>, product_name: &str) -> Option<String> {
    let digits: String = number?.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let message = format!("Hello, I'm interested in the {product_name}.");
    Some(format!(
        "https://wa.me/{digits}?text={}",
        urlencoding::encode(&message)
    ))
}

/// List available products.
///
/// GET /_api/products?priceRange=&brand=&size=&color=&quality=&search=
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, uri: Uri) -> Result<Json<ProductsResponse>> {
    let params: HashMap<String, String> = parse_query(&uri).context(LIST_CONTEXT)?;
    let filter = ProductFilter::from_query(&params)
        .map_err(ValidationError::from)
        .context(LIST_CONTEXT)?;

    let products = ProductRepository::new(state.pool())
        .list_available(&filter)
        .await
        .context(LIST_CONTEXT)?;

    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(ProductsResponse { products }))
}

/// Show one available product.
///
/// GET /_api/product?id=N
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, uri: Uri) -> Result<Json<ProductResponse>> {
    let params: HashMap<String, String> = parse_query(&uri).context(SHOW_CONTEXT)?;
    let raw_id = params.get("id").map_or("", String::as_str);
    let id = coerce_positive_id("id", raw_id).context(SHOW_CONTEXT)?;

    let product = ProductRepository::new(state.pool())
        .get_available(ProductId::new(id))
        .await
        .context(SHOW_CONTEXT)?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let number = SettingsRepository::new(state.pool())
        .get(WHATSAPP_NUMBER)
        .await
        .context(SHOW_CONTEXT)?;
    let buy_url = whatsapp_link(number.as_deref(), &product.name);

    Ok(Json(ProductResponse { product, buy_url }))
}
