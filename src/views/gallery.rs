//! Product image gallery with autoplay.

use std::time::Duration;

use crate::resources::Product;

/// Delay between two automatic advances.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

/// Image carousel state.
///
/// The shell calls [`Gallery::tick`] every [`AUTOPLAY_INTERVAL`]; the
/// gallery advances only while autoplay is active. Manual navigation pauses
/// autoplay for good, while [`Gallery::focus`] and [`Gallery::blur`] pause
/// and resume it around pointer hover.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::views::Gallery;
///
/// let mut gallery = Gallery::new(vec!["a.jpg".into(), "b.jpg".into()]);
/// assert!(gallery.tick());
/// assert_eq!(gallery.current_image(), Some("b.jpg"));
///
/// gallery.previous();
/// assert!(gallery.is_paused());
/// assert!(!gallery.tick());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    current: usize,
    paused: bool,
}

impl Gallery {
    /// Creates a gallery over `images`, empty URLs removed.
    #[must_use]
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images: images.into_iter().filter(|url| !url.is_empty()).collect(),
            current: 0,
            paused: false,
        }
    }

    /// Creates the gallery of a product: its main image, then the
    /// non-primary images in display order.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        let mut images: Vec<String> = product.primary_image().map(str::to_string).into_iter().collect();
        images.extend(product.gallery_images().into_iter().map(str::to_string));
        Self::new(images)
    }

    /// Returns every image URL.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Returns the index of the shown image.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Returns the shown image URL.
    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Returns `true` when autoplay is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns `true` when [`Gallery::tick`] would advance.
    #[must_use]
    pub fn is_autoplaying(&self) -> bool {
        !self.paused && self.has_navigation()
    }

    /// Returns `true` when there is more than one image.
    #[must_use]
    pub fn has_navigation(&self) -> bool {
        self.images.len() > 1
    }

    /// Shows the next image, wrapping around, and pauses autoplay.
    pub fn next(&mut self) {
        self.advance();
        self.paused = true;
    }

    /// Shows the previous image, wrapping around, and pauses autoplay.
    pub fn previous(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + self.images.len() - 1) % self.images.len();
        }
        self.paused = true;
    }

    /// Shows the image at `index` and pauses autoplay.
    ///
    /// Out of range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.images.len() {
            self.current = index;
            self.paused = true;
        }
    }

    /// Pauses autoplay (pointer entered the image).
    pub fn focus(&mut self) {
        self.paused = true;
    }

    /// Resumes autoplay (pointer left the image).
    pub fn blur(&mut self) {
        self.paused = false;
    }

    /// Advances when autoplay is active. Returns whether it advanced.
    pub fn tick(&mut self) -> bool {
        if !self.is_autoplaying() {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + 1) % self.images.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()])
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut gallery = gallery();
        gallery.previous();
        assert_eq!(gallery.current_image(), Some("c.jpg"));
    }

    #[test]
    fn test_tick_wraps_and_stops_when_paused() {
        let mut gallery = gallery();
        assert!(gallery.tick());
        assert!(gallery.tick());
        assert!(gallery.tick());
        assert_eq!(gallery.current_index(), 0);

        gallery.focus();
        assert!(!gallery.tick());
        gallery.blur();
        assert!(gallery.tick());
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let mut gallery = gallery();
        gallery.go_to(9);
        assert!(!gallery.is_paused());
        gallery.go_to(2);
        assert_eq!(gallery.current_image(), Some("c.jpg"));
        assert!(gallery.is_paused());
    }

    #[test]
    fn test_single_image_never_autoplays() {
        let mut gallery = Gallery::new(vec!["a.jpg".into(), String::new()]);
        assert!(!gallery.has_navigation());
        assert!(!gallery.tick());
    }

    #[test]
    fn test_product_gallery_order() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Casque", "slug": "casque",
            "main_image": "main.jpg",
            "images": [
                {"id": 1, "image": "main.jpg", "is_primary": true, "order": 0},
                {"id": 2, "image": "side.jpg", "order": 2},
                {"id": 3, "image": "back.jpg", "order": 1}
            ]
        }))
        .unwrap();

        assert_eq!(
            Gallery::for_product(&product).images(),
            &["main.jpg", "back.jpg", "side.jpg"]
        );
    }
}
