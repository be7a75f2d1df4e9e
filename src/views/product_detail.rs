//! Product detail page view model.

use crate::api::{ApiError, StorefrontApi};
use crate::catalog::ProductQuery;
use crate::resources::Product;
use crate::views::format::{format_price, product_order_message, whatsapp_link};
use crate::views::gallery::Gallery;

/// Maximum number of related products shown under a product.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Badge shown above the product gallery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailBadge {
    /// The category name.
    Category(String),
    /// The product is featured.
    Featured,
    /// The product is available.
    InStock,
    /// The product is unavailable.
    OutOfStock,
}

impl DetailBadge {
    /// Returns the badge text.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Category(name) => name,
            Self::Featured => "Produit vedette",
            Self::InStock => "En stock",
            Self::OutOfStock => "Rupture de stock",
        }
    }
}

/// One breadcrumb entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    /// Text shown.
    pub label: String,
    /// Link target; `None` for the current page.
    pub path: Option<String>,
}

/// Everything the product detail page renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDetailView {
    /// The product.
    pub product: Product,
    /// Same-category products, current one excluded.
    pub related: Vec<Product>,
    /// The product's images.
    pub gallery: Gallery,
}

impl ProductDetailView {
    /// Builds the view from an already fetched product and its related list.
    ///
    /// `related` is filtered to exclude `product` and truncated to
    /// [`RELATED_PRODUCTS_LIMIT`] entries.
    #[must_use]
    pub fn new(product: Product, related: Vec<Product>) -> Self {
        let related = related
            .into_iter()
            .filter(|candidate| candidate.id != product.id)
            .take(RELATED_PRODUCTS_LIMIT)
            .collect();
        let gallery = Gallery::for_product(&product);
        Self {
            product,
            related,
            gallery,
        }
    }

    /// Loads the product page for `slug`.
    ///
    /// Once the product arrives a view is recorded in the background. A
    /// failure to load related products leaves that list empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the product itself cannot be fetched,
    /// including [`ApiError::EmptySlug`] for a blank slug.
    pub async fn load(api: &StorefrontApi, slug: &str) -> Result<Self, ApiError> {
        let product = api.product(slug).await?;
        api.track_product_view_detached(slug);

        let related = match product.category_slug() {
            Some(category) => {
                match api
                    .products(&ProductQuery::new().category_slug(category.as_str()))
                    .await
                {
                    Ok(list) => list.into_results(),
                    Err(error) => {
                        tracing::warn!(
                            slug = %slug,
                            category = %category,
                            error = %error,
                            "failed to load related products"
                        );
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        Ok(Self::new(product, related))
    }

    /// Badges in display order.
    #[must_use]
    pub fn badges(&self) -> Vec<DetailBadge> {
        let mut badges = Vec::with_capacity(3);
        if let Some(name) = self.category_name() {
            badges.push(DetailBadge::Category(name.to_string()));
        }
        if self.product.is_featured {
            badges.push(DetailBadge::Featured);
        }
        badges.push(if self.product.is_in_stock {
            DetailBadge::InStock
        } else {
            DetailBadge::OutOfStock
        });
        badges
    }

    /// Home, products, category (when known), then the product itself.
    #[must_use]
    pub fn breadcrumb(&self) -> Vec<Crumb> {
        let mut crumbs = vec![
            Crumb {
                label: "Accueil".to_string(),
                path: Some("/".to_string()),
            },
            Crumb {
                label: "Produits".to_string(),
                path: Some("/products".to_string()),
            },
        ];
        if let (Some(name), Some(slug)) = (self.category_name(), self.product.category_slug()) {
            crumbs.push(Crumb {
                label: name.to_string(),
                path: Some(format!("/products?category={}", urlencoding::encode(&slug))),
            });
        }
        crumbs.push(Crumb {
            label: self.product.name.clone(),
            path: None,
        });
        crumbs
    }

    /// The price charged: final price, else display price, else base price.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.product
            .final_price
            .or(self.product.display_price)
            .or(self.product.price)
    }

    /// The crossed-out price, shown only for discounted products.
    #[must_use]
    pub fn compare_at_price(&self) -> Option<f64> {
        if self.product.has_discount {
            self.product.compare_at_price
        } else {
            None
        }
    }

    /// Formatted price lines: the charged price, then the crossed-out one.
    #[must_use]
    pub fn price_lines(&self, currency: &str) -> Vec<String> {
        self.price()
            .into_iter()
            .chain(self.compare_at_price())
            .map(|amount| format_price(amount, currency))
            .collect()
    }

    /// Non-empty characteristic lines.
    #[must_use]
    pub fn characteristics(&self) -> Vec<&str> {
        self.product.characteristic_lines()
    }

    /// WhatsApp order link, or `None` when the product is out of stock.
    ///
    /// The product's own link is used when present, otherwise one is built
    /// for `whatsapp_number`.
    #[must_use]
    pub fn order_link(&self, whatsapp_number: &str, currency: &str) -> Option<String> {
        if !self.product.is_in_stock {
            return None;
        }
        if let Some(link) = self
            .product
            .whatsapp_link
            .as_deref()
            .filter(|link| !link.is_empty())
        {
            return Some(link.to_string());
        }
        let price = self.price().map(|amount| format_price(amount, currency));
        Some(whatsapp_link(
            whatsapp_number,
            &product_order_message(&self.product.name, price.as_deref()),
        ))
    }

    fn category_name(&self) -> Option<&str> {
        self.product
            .category_name
            .as_deref()
            .or_else(|| self.product.category.as_ref().map(|c| c.name.as_str()))
            .filter(|name| !name.trim().is_empty())
    }
}
