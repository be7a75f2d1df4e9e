//! Catalog filter state and its URL query representation.

use crate::catalog::ProductQuery;
use crate::clients::encode_query;

/// The filters a visitor can apply to the catalog.
///
/// The default value means "no filter". Filters round-trip through the page
/// URL: [`CatalogFilters::to_query`] writes only non-default values, in a
/// fixed order, and [`CatalogFilters::from_query`] reads them back.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::catalog::CatalogFilters;
///
/// let mut filters = CatalogFilters::default();
/// filters.in_stock = true;
/// filters.toggle_brand("Sony");
///
/// let query = filters.to_query();
/// assert_eq!(query, "in_stock=true&brands=Sony");
/// assert_eq!(CatalogFilters::from_query(&query), filters);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogFilters {
    /// Free-text search.
    pub search: String,
    /// Selected category slug.
    pub category: String,
    /// Only products in stock.
    pub in_stock: bool,
    /// Only discounted products.
    pub has_discount: bool,
    /// Only featured products.
    pub is_featured: bool,
    /// Minimum price, as typed.
    pub min_price: String,
    /// Maximum price, as typed.
    pub max_price: String,
    /// Selected brands, in selection order.
    pub brands: Vec<String>,
}

impl CatalogFilters {
    /// Reads filters from a URL query string (with or without a leading `?`).
    ///
    /// Unknown keys are ignored. Flags are set only by the literal `true`.
    /// When a key repeats, the last value wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut filters = Self::default();

        for (key, value) in parse_query(query) {
            match key.as_str() {
                "search" => filters.search = value,
                "category" => filters.category = value,
                "in_stock" => filters.in_stock = value == "true",
                "has_discount" => filters.has_discount = value == "true",
                "is_featured" => filters.is_featured = value == "true",
                "min_price" => filters.min_price = value,
                "max_price" => filters.max_price = value,
                "brands" => {
                    filters.brands = value
                        .split(',')
                        .filter(|brand| !brand.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        filters
    }

    /// Writes the non-default filters as a percent-encoded query string.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut push_text = |key: &str, value: &str| {
            if !value.is_empty() {
                pairs.push((key.to_string(), value.to_string()));
            }
        };

        push_text("search", &self.search);
        push_text("category", &self.category);
        push_text("in_stock", flag(self.in_stock));
        push_text("has_discount", flag(self.has_discount));
        push_text("is_featured", flag(self.is_featured));
        push_text("min_price", &self.min_price);
        push_text("max_price", &self.max_price);
        push_text("brands", &self.brands.join(","));

        encode_query(&pairs)
    }

    /// Returns `true` when any filter differs from its default.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// Adds `brand` to the selection, or removes it when already selected.
    ///
    /// Blank names and names containing a comma cannot be written to the
    /// `brands` URL key, so they are ignored and `false` is returned.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        let brand = brand.trim();
        if brand.is_empty() || brand.contains(',') {
            return false;
        }
        if let Some(index) = self.brands.iter().position(|b| b == brand) {
            self.brands.remove(index);
        } else {
            self.brands.push(brand.to_string());
        }
        true
    }

    /// Returns `true` when `brand` is selected.
    #[must_use]
    pub fn is_brand_selected(&self, brand: &str) -> bool {
        self.brands.iter().any(|b| b == brand)
    }

    /// Builds the listing query for the given page.
    #[must_use]
    pub fn to_product_query(&self, page: u32) -> ProductQuery {
        let mut query = ProductQuery::new()
            .search(self.search.as_str())
            .category_slug(self.category.as_str())
            .brands(self.brands.iter().cloned())
            .min_price(self.min_price.as_str())
            .max_price(self.max_price.as_str())
            .page(page);

        if self.in_stock {
            query = query.in_stock(true);
        }
        if self.is_featured {
            query = query.featured(true);
        }
        if self.has_discount {
            query = query.discounted(true);
        }
        query
    }
}

const fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        ""
    }
}

/// Splits and percent-decodes a query string. `+` decodes to a space.
fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(text: &str) -> String {
    let spaced = text.replace('+', " ");
    urlencoding::decode(&spaced).map_or_else(|_| spaced.clone(), |decoded| decoded.into_owned())
}
