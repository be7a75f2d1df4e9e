//! Catalog browsing state: filters, page cursor and accumulated results.
//!
//! [`CatalogBrowser`] is a synchronous state machine. Every transition
//! returns the [`BrowserEffect`]s the UI shell must perform, and fetching is
//! split into [`CatalogBrowser::current_request`] and
//! [`CatalogBrowser::apply_response`] so that responses arriving after the
//! filters changed can be recognized and dropped.

use std::collections::BTreeSet;

use crate::api::{ApiError, StorefrontApi};
use crate::catalog::{CatalogFilters, ProductQuery};
use crate::resources::{ListResponse, Product};

/// Side effect requested by a browser transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserEffect {
    /// Replace the page URL query with this string (no leading `?`).
    SyncUrl(String),
    /// Scroll the page back to the top.
    ScrollToTop,
}

/// What the product grid should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// The first page has not arrived yet.
    Loading,
    /// The first page arrived with no products.
    Empty,
    /// Products are available.
    Ready,
}

/// A listing request tagged with the state it was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Filter generation at issue time.
    pub generation: u64,
    /// Requested page.
    pub page: u32,
    /// The query to send.
    pub query: ProductQuery,
}

/// Catalog browsing state.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::catalog::{BrowserEffect, CatalogBrowser};
///
/// let mut browser = CatalogBrowser::from_url("category=audio");
/// let effects = browser.toggle_category("audio");
///
/// assert_eq!(effects, vec![BrowserEffect::SyncUrl(String::new()), BrowserEffect::ScrollToTop]);
/// assert!(browser.filters().category.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct CatalogBrowser {
    filters: CatalogFilters,
    page: u32,
    generation: u64,
    products: Vec<Product>,
    /// Length of `products` before the current page was applied.
    page_start: usize,
    next: Option<String>,
    total_count: u64,
    page_loaded: bool,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(CatalogFilters::default())
    }
}

impl CatalogBrowser {
    /// Creates a browser on page 1 with the given filters.
    #[must_use]
    pub fn new(filters: CatalogFilters) -> Self {
        Self {
            filters,
            page: 1,
            generation: 0,
            products: Vec::new(),
            page_start: 0,
            next: None,
            total_count: 0,
            page_loaded: false,
        }
    }

    /// Creates a browser from the page URL query string.
    #[must_use]
    pub fn from_url(query: &str) -> Self {
        Self::new(CatalogFilters::from_query(query))
    }

    /// Returns the current filters.
    #[must_use]
    pub const fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    /// Returns the current page cursor.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the accumulated products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the total reported by the backend for the current filters.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns `true` when the backend reported a further page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` while a page after the first is in flight.
    #[must_use]
    pub const fn is_loading_more(&self) -> bool {
        self.page > 1 && !self.page_loaded
    }

    /// Returns what the product grid should show.
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        if !self.products.is_empty() {
            LoadState::Ready
        } else if self.page_loaded {
            LoadState::Empty
        } else {
            LoadState::Loading
        }
    }

    /// Returns `true` when any filter is set.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filters.has_active_filters()
    }

    /// Returns the current URL query string.
    #[must_use]
    pub fn url_query(&self) -> String {
        self.filters.to_query()
    }

    /// Sorted, de-duplicated brands of the accumulated products.
    #[must_use]
    pub fn available_brands(&self) -> Vec<String> {
        self.products
            .iter()
            .map(|product| product.brand.trim())
            .filter(|brand| !brand.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Returns the request for the current filters and page.
    #[must_use]
    pub fn current_request(&self) -> PageRequest {
        PageRequest {
            generation: self.generation,
            page: self.page,
            query: self.filters.to_product_query(self.page),
        }
    }

    /// Applies a listing response.
    ///
    /// Page 1 replaces the accumulated list and later pages append to it.
    /// Applying the same page again replaces that page's products.
    /// A response issued for an older generation or another page is ignored
    /// and `false` is returned.
    pub fn apply_response(&mut self, request: &PageRequest, response: ListResponse<Product>) -> bool {
        if request.generation != self.generation || request.page != self.page {
            tracing::debug!(
                generation = request.generation,
                current_generation = self.generation,
                page = request.page,
                current_page = self.page,
                "ignoring stale catalog response"
            );
            return false;
        }

        let ListResponse {
            count,
            next,
            results,
            ..
        } = response;

        self.products.truncate(self.page_start);
        self.products.extend(results);
        self.next = next;
        self.total_count = count;
        self.page_loaded = true;
        true
    }

    /// Fetches the current page through `api` and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the fetch fails; the state is left as it was.
    pub async fn refresh(&mut self, api: &StorefrontApi) -> Result<(), ApiError> {
        let request = self.current_request();
        let response = api.products(&request.query).await?;
        self.apply_response(&request, response);
        Ok(())
    }

    /// Advances to the next page when the backend reported one.
    ///
    /// Returns the request to issue, or `None` when there is nothing more or
    /// the current page is still loading.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.has_more() || !self.page_loaded {
            return None;
        }
        self.page += 1;
        self.page_start = self.products.len();
        self.page_loaded = false;
        Some(self.current_request())
    }

    /// Sets the search text.
    pub fn set_search(&mut self, text: &str) -> Vec<BrowserEffect> {
        let text = text.trim();
        if self.filters.search == text {
            return Vec::new();
        }
        self.filters.search = text.to_string();
        self.filters_changed()
    }

    /// Selects a category, or clears it with an empty slug.
    pub fn select_category(&mut self, slug: &str) -> Vec<BrowserEffect> {
        if self.filters.category == slug {
            return Vec::new();
        }
        self.filters.category = slug.to_string();
        let mut effects = self.filters_changed();
        effects.push(BrowserEffect::ScrollToTop);
        effects
    }

    /// Selects `slug`, or clears the selection when `slug` is already active.
    pub fn toggle_category(&mut self, slug: &str) -> Vec<BrowserEffect> {
        if self.filters.category == slug {
            self.select_category("")
        } else {
            self.select_category(slug)
        }
    }

    /// Sets the in-stock-only flag.
    pub fn set_in_stock(&mut self, value: bool) -> Vec<BrowserEffect> {
        if self.filters.in_stock == value {
            return Vec::new();
        }
        self.filters.in_stock = value;
        self.filters_changed()
    }

    /// Sets the discounted-only flag.
    pub fn set_has_discount(&mut self, value: bool) -> Vec<BrowserEffect> {
        if self.filters.has_discount == value {
            return Vec::new();
        }
        self.filters.has_discount = value;
        self.filters_changed()
    }

    /// Sets the featured-only flag.
    pub fn set_featured(&mut self, value: bool) -> Vec<BrowserEffect> {
        if self.filters.is_featured == value {
            return Vec::new();
        }
        self.filters.is_featured = value;
        self.filters_changed()
    }

    /// Sets the minimum price text.
    pub fn set_min_price(&mut self, value: &str) -> Vec<BrowserEffect> {
        if self.filters.min_price == value {
            return Vec::new();
        }
        self.filters.min_price = value.to_string();
        self.filters_changed()
    }

    /// Sets the maximum price text.
    pub fn set_max_price(&mut self, value: &str) -> Vec<BrowserEffect> {
        if self.filters.max_price == value {
            return Vec::new();
        }
        self.filters.max_price = value.to_string();
        self.filters_changed()
    }

    /// Adds or removes a brand from the selection.
    ///
    /// Blank names and names containing a comma change nothing.
    pub fn toggle_brand(&mut self, brand: &str) -> Vec<BrowserEffect> {
        if !self.filters.toggle_brand(brand) {
            return Vec::new();
        }
        self.filters_changed()
    }

    /// Resets every filter and the URL.
    pub fn clear_all(&mut self) -> Vec<BrowserEffect> {
        let category_changed = !self.filters.category.is_empty();
        self.filters = CatalogFilters::default();
        let mut effects = self.filters_changed();
        if category_changed {
            effects.push(BrowserEffect::ScrollToTop);
        }
        effects
    }

    fn filters_changed(&mut self) -> Vec<BrowserEffect> {
        self.generation += 1;
        self.page = 1;
        self.products.clear();
        self.page_start = 0;
        self.next = None;
        self.total_count = 0;
        self.page_loaded = false;
        vec![BrowserEffect::SyncUrl(self.filters.to_query())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, brand: Option<&str>) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Produit {id}"),
            "slug": format!("produit-{id}"),
            "brand": brand,
        }))
        .unwrap()
    }

    fn page(ids: &[u64], next: Option<&str>) -> ListResponse<Product> {
        ListResponse {
            count: 4,
            next: next.map(str::to_string),
            previous: None,
            results: ids.iter().map(|id| product(*id, Some("Sony"))).collect(),
        }
    }

    #[test]
    fn test_new_browser_is_loading_page_one() {
        let browser = CatalogBrowser::default();
        assert_eq!(browser.load_state(), LoadState::Loading);
        assert_eq!(browser.page(), 1);
        assert_eq!(
            browser.current_request().query.to_pairs(),
            vec![("page".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_reapplying_a_loaded_page_does_not_duplicate_it() {
        let mut browser = CatalogBrowser::from_url("");
        let first = browser.current_request();
        assert!(browser.apply_response(&first, page(&[1], Some("p2"))));

        let second = browser.load_more().unwrap();
        assert!(browser.apply_response(&second, page(&[2], None)));
        let again = browser.current_request();
        assert!(browser.apply_response(&again, page(&[2, 3], None)));

        let ids: Vec<u64> = browser.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_page_two_appends() {
        let mut browser = CatalogBrowser::from_url("");
        let first = browser.current_request();
        assert!(browser.apply_response(&first, page(&[1, 2], Some("p2"))));

        let second = browser.load_more().unwrap();
        assert_eq!(second.page, 2);
        assert!(browser.is_loading_more());
        assert!(browser.apply_response(&second, page(&[3, 4], None)));

        let ids: Vec<u64> = browser.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!browser.has_more());
        assert!(browser.load_more().is_none());
    }

    #[test]
    fn test_empty_first_page() {
        let mut browser = CatalogBrowser::from_url("");
        let request = browser.current_request();
        browser.apply_response(&request, ListResponse::default());
        assert_eq!(browser.load_state(), LoadState::Empty);
    }

    #[test]
    fn test_category_change_clears_and_scrolls() {
        let mut browser = CatalogBrowser::from_url("");
        let request = browser.current_request();
        browser.apply_response(&request, page(&[1], None));

        let effects = browser.select_category("audio");
        assert_eq!(
            effects,
            vec![
                BrowserEffect::SyncUrl("category=audio".to_string()),
                BrowserEffect::ScrollToTop
            ]
        );
        assert!(browser.products().is_empty());
        assert_eq!(browser.load_state(), LoadState::Loading);
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut browser = CatalogBrowser::from_url("");
        let stale = browser.current_request();
        browser.set_in_stock(true);

        assert!(!browser.apply_response(&stale, page(&[1], None)));
        assert!(browser.products().is_empty());

        let fresh = browser.current_request();
        assert!(fresh.generation > stale.generation);
        assert!(browser.apply_response(&fresh, page(&[2], None)));
    }

    #[test]
    fn test_unchanged_setter_emits_nothing() {
        let mut browser = CatalogBrowser::from_url("in_stock=true");
        assert!(browser.set_in_stock(true).is_empty());
        assert!(browser.set_search("").is_empty());
    }

    #[test]
    fn test_clear_all_restores_default() {
        let mut browser = CatalogBrowser::from_url("search=tv&brands=LG&min_price=10");
        assert!(browser.has_active_filters());

        let effects = browser.clear_all();
        assert_eq!(effects, vec![BrowserEffect::SyncUrl(String::new())]);
        assert_eq!(browser.filters(), &CatalogFilters::default());
        assert!(!browser.has_active_filters());
    }

    #[test]
    fn test_available_brands_sorted_unique() {
        let mut browser = CatalogBrowser::from_url("");
        let request = browser.current_request();
        browser.apply_response(
            &request,
            ListResponse::from_results(vec![
                product(1, Some("Sony")),
                product(2, Some("JBL")),
                product(3, None),
                product(4, Some("Sony")),
            ]),
        );
        assert_eq!(browser.available_brands(), vec!["JBL", "Sony"]);
    }
}
