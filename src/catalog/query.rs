//! Query parameters for the product listing endpoint.

/// Parameters sent to `/products/`.
///
/// Only fields that are set are encoded, always in the same order, so two
/// equal queries produce the same cache key.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::catalog::ProductQuery;
///
/// let query = ProductQuery::new()
///     .search("casque")
///     .category_slug("audio")
///     .in_stock(true)
///     .page(2);
///
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("search".to_string(), "casque".to_string()),
///         ("category_slug".to_string(), "audio".to_string()),
///         ("is_in_stock".to_string(), "true".to_string()),
///         ("page".to_string(), "2".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Full-text search.
    pub search: Option<String>,
    /// Category slug.
    pub category_slug: Option<String>,
    /// Brands, sent comma separated.
    pub brands: Vec<String>,
    /// Stock filter.
    pub is_in_stock: Option<bool>,
    /// Featured filter.
    pub is_featured: Option<bool>,
    /// Recommended filter.
    pub is_recommended: Option<bool>,
    /// Minimum price, as typed by the visitor.
    pub min_price: Option<String>,
    /// Maximum price, as typed by the visitor.
    pub max_price: Option<String>,
    /// Discount filter.
    pub has_discount: Option<bool>,
    /// Backend ordering expression (e.g. `-created_at`).
    pub ordering: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size override.
    pub page_size: Option<u32>,
}

impl ProductQuery {
    /// Creates an empty query (first page, no filters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The home page "featured" carousel query.
    #[must_use]
    pub fn featured_products() -> Self {
        Self::new()
            .featured(true)
            .ordering("-featured_score")
            .page_size(20)
    }

    /// The home page "recent products" carousel query.
    #[must_use]
    pub fn recent_products() -> Self {
        Self::new().ordering("-created_at").page_size(8)
    }

    /// Sets the search text; blank text clears it.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = non_blank(text.into());
        self
    }

    /// Sets the category slug; a blank slug clears it.
    #[must_use]
    pub fn category_slug(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = non_blank(slug.into());
        self
    }

    /// Replaces the brand selection.
    #[must_use]
    pub fn brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the stock filter.
    #[must_use]
    pub const fn in_stock(mut self, value: bool) -> Self {
        self.is_in_stock = Some(value);
        self
    }

    /// Sets the featured filter.
    #[must_use]
    pub const fn featured(mut self, value: bool) -> Self {
        self.is_featured = Some(value);
        self
    }

    /// Sets the recommended filter.
    #[must_use]
    pub const fn recommended(mut self, value: bool) -> Self {
        self.is_recommended = Some(value);
        self
    }

    /// Sets the discount filter.
    #[must_use]
    pub const fn discounted(mut self, value: bool) -> Self {
        self.has_discount = Some(value);
        self
    }

    /// Sets the minimum price; blank text clears it.
    #[must_use]
    pub fn min_price(mut self, value: impl Into<String>) -> Self {
        self.min_price = non_blank(value.into());
        self
    }

    /// Sets the maximum price; blank text clears it.
    #[must_use]
    pub fn max_price(mut self, value: impl Into<String>) -> Self {
        self.max_price = non_blank(value.into());
        self
    }

    /// Sets the ordering expression.
    #[must_use]
    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = non_blank(ordering.into());
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Encodes the query as ordered key/value pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: String| pairs.push((key.to_string(), value));

        if let Some(search) = &self.search {
            push("search", search.clone());
        }
        if let Some(slug) = &self.category_slug {
            push("category_slug", slug.clone());
        }
        let brands: Vec<&str> = self
            .brands
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect();
        if !brands.is_empty() {
            push("brand", brands.join(","));
        }
        if let Some(value) = self.is_in_stock {
            push("is_in_stock", value.to_string());
        }
        if let Some(value) = self.is_featured {
            push("is_featured", value.to_string());
        }
        if let Some(value) = self.is_recommended {
            push("is_recommended", value.to_string());
        }
        if let Some(value) = &self.min_price {
            push("min_price", value.clone());
        }
        if let Some(value) = &self.max_price {
            push("max_price", value.clone());
        }
        if let Some(value) = self.has_discount {
            push("has_discount", value.to_string());
        }
        if let Some(ordering) = &self.ordering {
            push("ordering", ordering.clone());
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            push("page", page.to_string());
        }
        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            push("page_size", size.to_string());
        }

        pairs
    }
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == text.len() {
        Some(text)
    } else {
        Some(trimmed.to_string())
    }
}
