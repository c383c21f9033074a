//! Conversion between `NUMERIC` columns read as decimal strings and the
//! floating-point numbers the JSON API exposes.

/// Parse a decimal string from the database into a number.
///
/// Returns `None` for a missing value, an unparsable string, or a value
/// that does not fit a finite `f64`.
///
/// ```
/// use champ_core::numeric_to_number;
///
/// assert_eq!(numeric_to_number(Some("1499.00")), Some(1499.0));
/// assert_eq!(numeric_to_number(Some("n/a")), None);
/// assert_eq!(numeric_to_number(None), None);
/// ```
#[must_use]
pub fn numeric_to_number(numeric: Option<&str>) -> Option<f64> {
    numeric?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Render a number as a decimal string suitable for a `NUMERIC` column.
///
/// Rust's float formatting never uses exponent notation, so the result is
/// always accepted by `::numeric`.
#[must_use]
pub fn number_to_numeric(number: Option<f64>) -> Option<String> {
    number.map(|n| n.to_string())
}
