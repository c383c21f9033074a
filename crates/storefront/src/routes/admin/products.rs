//! Admin product management.
//!
//! The admin check is an extractor, so it runs before the body is parsed.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use champ_core::Product;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result, ResultExt, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::models::product::{CreateProductRequest, DeleteProductRequest, UpdateProductRequest};
use crate::state::AppState;
use crate::validation::parse_json;

const CREATE_CONTEXT: &str = "Failed to create product";
const UPDATE_CONTEXT: &str = "Failed to update product";
const DELETE_CONTEXT: &str = "Failed to delete product";

/// Single product response.
#[derive(Debug, Serialize)]
pub struct ProductBody {
    pub product: Product,
}

/// Success flag response.
#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

/// Create a product.
///
/// POST /_api/admin/products
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Bytes,
) -> Result<(StatusCode, Json<ProductBody>)> {
    let new_product = parse_json::<CreateProductRequest>(&body)
        .and_then(CreateProductRequest::validate)
        .context(CREATE_CONTEXT)?;

    let product = ProductRepository::new(state.pool())
        .create(&new_product)
        .await
        .context(CREATE_CONTEXT)?;

    let id = product.id.to_string();
    add_breadcrumb("admin", "Product created", &[("product_id", id.as_str())]);
    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(ProductBody { product })))
}

/// Partially update a product.
///
/// POST /_api/admin/product/update
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Bytes,
) -> Result<Json<ProductBody>> {
    let (id, changes) = parse_json::<UpdateProductRequest>(&body)
        .and_then(UpdateProductRequest::validate)
        .context(UPDATE_CONTEXT)?;

    let product = ProductRepository::new(state.pool())
        .update(id, &changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_owned()),
            other => AppError::Repository {
                context: UPDATE_CONTEXT,
                source: other,
            },
        })?;

    let id = id.to_string();
    add_breadcrumb("admin", "Product updated", &[("product_id", id.as_str())]);
    tracing::info!(product_id = %id, "Product updated");

    Ok(Json(ProductBody { product }))
}

/// Delete a product.
///
/// POST /_api/admin/product/delete
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Bytes,
) -> Result<Json<SuccessBody>> {
    let id = parse_json::<DeleteProductRequest>(&body)
        .and_then(DeleteProductRequest::validate)
        .context(DELETE_CONTEXT)?;

    let deleted = ProductRepository::new(state.pool())
        .delete(id)
        .await
        .context(DELETE_CONTEXT)?;

    if !deleted {
        return Err(AppError::NotFound(
            "Product not found or already deleted".to_owned(),
        ));
    }

    let id = id.to_string();
    add_breadcrumb("admin", "Product deleted", &[("product_id", id.as_str())]);
    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(SuccessBody { success: true }))
}
