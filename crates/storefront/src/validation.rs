//! Request validation.
//!
//! Bodies are read as bytes and query strings taken from the raw URI, then
//! decoded here instead of through axum's `Json` and `Query` extractors, so
//! malformed input produces the same `{error, details}` body as a rule
//! violation.

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::Uri;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use champ_core::FilterError;

/// A request that failed validation. Rendered as the `details` field of a
/// 400 response.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field broke one of its rules.
    #[error("{field}: {message}")]
    Field {
        field: &'static str,
        message: String,
    },

    /// The body is not JSON of the expected shape.
    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),

    /// The query string does not decode into the expected parameters.
    #[error("invalid query string: {}", .0.body_text())]
    Query(#[from] QueryRejection),

    /// A catalog filter value outside its vocabulary.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl ValidationError {
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Field {
            field,
            message: message.into(),
        }
    }
}

/// Decode a JSON request body.
///
/// # Errors
///
/// Returns `ValidationError::Body` for malformed JSON, missing fields, or
/// values of the wrong type.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a request's query string.
///
/// # Errors
///
/// Returns `ValidationError::Query` when the parameters do not deserialize.
pub fn parse_query<T: DeserializeOwned>(uri: &Uri) -> Result<T, ValidationError> {
    let Query(params) = Query::try_from_uri(uri)?;
    Ok(params)
}

/// Require at least `min` characters (not bytes).
///
/// # Errors
///
/// Returns `ValidationError::Field` with `message` when `value` is shorter.
pub fn min_chars(
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::field(field, message));
    }
    Ok(())
}

/// Require a finite number greater than zero.
///
/// # Errors
///
/// Returns `ValidationError::Field` with `message` otherwise.
pub fn positive_number(field: &'static str, value: f64, message: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::field(field, message));
    }
    Ok(())
}

/// Require an absolute URL.
///
/// # Errors
///
/// Returns `ValidationError::Field` if `value` does not parse as a URL.
pub fn url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    Url::parse(value).map_err(|_| ValidationError::field(field, "Must be a valid URL"))?;
    Ok(())
}

/// Require every entry to be an absolute URL.
///
/// # Errors
///
/// Returns `ValidationError::Field` naming the first bad entry's index.
pub fn url_list(field: &'static str, values: &[String]) -> Result<(), ValidationError> {
    for (index, value) in values.iter().enumerate() {
        if Url::parse(value).is_err() {
            return Err(ValidationError::field(
                field,
                format!("entry {index} must be a valid URL"),
            ));
        }
    }
    Ok(())
}

/// Require a strictly positive integer that fits an `INTEGER` column.
///
/// # Errors
///
/// Returns `ValidationError::Field` for zero, negatives, or out-of-range ids.
pub fn positive_id(field: &'static str, value: i64) -> Result<i32, ValidationError> {
    match i32::try_from(value) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::field(field, "must be a positive integer")),
    }
}

/// Coerce a query-string value to a strictly positive integer.
///
/// # Errors
///
/// Returns `ValidationError::Field` if `raw` is not an integer or not positive.
pub fn coerce_positive_id(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::field(field, "must be a positive integer"))?;
    positive_id(field, value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_min_chars_counts_characters() {
        assert!(min_chars("name", "éé", 3, "too short").is_err());
        assert!(min_chars("name", "ééé", 3, "too short").is_ok());
    }

    #[test]
    fn test_field_error_display() {
        let err = min_chars("name", "AJ", 3, "Name must be at least 3 characters").unwrap_err();
        assert_eq!(err.to_string(), "name: Name must be at least 3 characters");
    }

    #[test]
    fn test_positive_number() {
        assert!(positive_number("price", 0.01, "bad").is_ok());
        assert!(positive_number("price", 0.0, "bad").is_err());
        assert!(positive_number("price", -5.0, "bad").is_err());
        assert!(positive_number("price", f64::INFINITY, "bad").is_err());
        assert!(positive_number("price", f64::NAN, "bad").is_err());
    }

    #[test]
    fn test_url_rules() {
        assert!(url("mainImageUrl", "https://cdn.example.com/a.jpg").is_ok());
        assert!(url("mainImageUrl", "not a url").is_err());
        let err = url_list(
            "galleryImagesUrls",
            &["https://a.example/1.jpg".to_owned(), "/relative.jpg".to_owned()],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "galleryImagesUrls: entry 1 must be a valid URL");
    }

    #[test]
    fn test_parse_query() {
        #[derive(Debug, serde::Deserialize)]
        struct Page {
            page: u32,
        }

        let uri: Uri = "/_api/products?page=2".parse().unwrap();
        assert_eq!(parse_query::<Page>(&uri).unwrap().page, 2);

        let uri: Uri = "/_api/products?page=two".parse().unwrap();
        let err = parse_query::<Page>(&uri).unwrap_err();
        assert!(matches!(err, ValidationError::Query(_)));
        assert!(err.to_string().starts_with("invalid query string: "));
    }

    #[test]
    fn test_coerce_positive_id() {
        assert_eq!(coerce_positive_id("id", "42").unwrap(), 42);
        assert_eq!(coerce_positive_id("id", " 7 ").unwrap(), 7);
        assert!(coerce_positive_id("id", "0").is_err());
        assert!(coerce_positive_id("id", "-3").is_err());
        assert!(coerce_positive_id("id", "abc").is_err());
        assert!(coerce_positive_id("id", "1.5").is_err());
        assert!(coerce_positive_id("id", "99999999999").is_err());
    }

    #[test]
    fn test_parse_json_reports_body_errors() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            #[allow(dead_code)]
            id: i64,
        }

        let err = parse_json::<Body>(b"{\"id\": \"x\"}").unwrap_err();
        assert!(matches!(err, ValidationError::Body(_)));
        assert!(parse_json::<Body>(b"not json").is_err());
        assert_eq!(parse_json::<Body>(b"{\"id\": 3}").unwrap().id, 3);
    }
}
