//! Catalog filter vocabularies.
//!
//! Each filter parses from the slug used in storefront query strings
//! (`?brand=nike`) and maps to the label stored in the `products` table
//! (`Nike`). Slugs are matched exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A query-string value that is not part of a filter's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} '{value}', expected one of: {}", .expected.join(", "))]
pub struct FilterError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

macro_rules! catalog_filter {
    (
        $(#[$meta:meta])*
        $name:ident, $field:tt {
            $($variant:ident => $slug:tt, $label:tt;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $slug)]
                $variant,
            )+
        }

        impl $name {
            /// Query-string name of this filter.
            pub const FIELD: &'static str = $field;

            /// Accepted slugs, in display order.
            pub const SLUGS: &'static [&'static str] = &[$($slug),+];

            /// Slug as it appears in the query string.
            #[must_use]
            pub const fn slug(self) -> &'static str {
                match self {
                    $(Self::$variant => $slug,)+
                }
            }

            /// Label stored in the database column.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($slug => Ok(Self::$variant),)+
                    _ => Err(FilterError {
                        field: Self::FIELD,
                        value: s.to_owned(),
                        expected: Self::SLUGS,
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.slug())
            }
        }
    };
}

catalog_filter! {
    /// Price bucket shown as "Shop by Price" on the home page.
    PriceRange, "priceRange" {
        Under999 => "under-999", "Under 999";
        Under1499 => "under-1499", "Under 1499";
        Under1999 => "under-1999", "Under 1999";
        Under2499 => "under-2499", "Under 2499";
        Above2499 => "above-2499", "Above 2499";
    }
}

catalog_filter! {
    Brand, "brand" {
        Nike => "nike", "Nike";
        Adidas => "adidas", "Adidas";
        Puma => "puma", "Puma";
        Reebok => "reebok", "Reebok";
        Yeezy => "yeezy", "Yeezy";
        Others => "others", "Others";
    }
}

catalog_filter! {
    /// Shoe size. The slug and the stored label are identical.
    Size, "size" {
        Size10A => "10A", "10A";
        Size7A => "7A", "7A";
        Size6A => "6A", "6A";
        Size5A => "5A", "5A";
        Size9A => "9A", "9A";
    }
}

catalog_filter! {
    Color, "color" {
        Black => "black", "Black";
        White => "white", "White";
        Red => "red", "Red";
        Blue => "blue", "Blue";
        Multicolor => "multicolor", "Multicolor";
    }
}

catalog_filter! {
    /// Replica grade.
    Quality, "quality" {
        Grade10A => "10a", "10A";
        Grade9A => "9a", "9A";
        Grade7A => "7a", "7A";
        Grade6A => "6a", "6A";
        Grade5A => "5a", "5A";
    }
}

/// Comparison a [`PriceRange`] applies to the `price` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    /// `price < amount`
    Below(Decimal),
    /// `price > amount`
    Above(Decimal),
}

impl PriceRange {
    /// The predicate this bucket adds to a listing query.
    ///
    /// Bounds are strict on both sides, so a product priced exactly 2499
    /// is in none of `under-2499` and `above-2499`.
    #[must_use]
    pub fn bound(self) -> PriceBound {
        match self {
            Self::Under999 => PriceBound::Below(Decimal::from(999)),
            Self::Under1499 => PriceBound::Below(Decimal::from(1499)),
            Self::Under1999 => PriceBound::Below(Decimal::from(1999)),
            Self::Under2499 => PriceBound::Below(Decimal::from(2499)),
            Self::Above2499 => PriceBound::Above(Decimal::from(2499)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_slug_maps_to_label() {
        let brand: Brand = "yeezy".parse().unwrap();
        assert_eq!(brand, Brand::Yeezy);
        assert_eq!(brand.label(), "Yeezy");
    }

    #[test]
    fn test_quality_slug_is_lowercase_label_is_upper() {
        let quality: Quality = "10a".parse().unwrap();
        assert_eq!(quality.label(), "10A");
        assert!("10A".parse::<Quality>().is_err());
    }

    #[test]
    fn test_size_is_case_sensitive() {
        assert_eq!("9A".parse::<Size>().unwrap().label(), "9A");
        assert!("9a".parse::<Size>().is_err());
    }

    #[test]
    fn test_unknown_slug_lists_expected_values() {
        let err = "green".parse::<Color>().unwrap_err();
        assert_eq!(err.field, "color");
        assert_eq!(
            err.to_string(),
            "invalid color 'green', expected one of: black, white, red, blue, multicolor"
        );
    }

    #[test]
    fn test_price_range_bounds() {
        assert_eq!(
            PriceRange::Under1499.bound(),
            PriceBound::Below(Decimal::from(1499))
        );
        assert_eq!(
            PriceRange::Above2499.bound(),
            PriceBound::Above(Decimal::from(2499))
        );
        assert!("999-1499".parse::<PriceRange>().is_err());
    }

    #[test]
    fn test_filter_serde_uses_slug() {
        let json = serde_json::to_string(&PriceRange::Under999).unwrap();
        assert_eq!(json, "\"under-999\"");
    }
}
