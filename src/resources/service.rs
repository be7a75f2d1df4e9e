//! Services offered by the shop (repairs, installation, sourcing...).

use serde::{Deserialize, Serialize};

/// A service listed on the services page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Backend identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Illustration URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Display order.
    #[serde(default)]
    pub order: i32,
    /// Whether the service is currently offered.
    #[serde(default)]
    pub is_active: bool,
    /// "Learn more" link.
    #[serde(default)]
    pub external_link: Option<String>,
}

impl Service {
    /// Returns the illustration URL when one is set.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns the external link when one is set.
    #[must_use]
    pub fn external_link(&self) -> Option<&str> {
        self.external_link.as_deref().filter(|url| !url.is_empty())
    }
}
