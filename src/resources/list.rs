//! The paginated list envelope shared by every list endpoint.

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};

/// A page of results in the backend's `{count, next, previous, results}` envelope.
///
/// Some endpoints answer with a bare JSON array; it is accepted and wrapped
/// with `count` set to its length and no neighbouring pages.
///
/// `ListResponse<T>` derefs to `[T]`, so it can be iterated directly.
///
/// # Example
///
/// ```rust
/// use showcase_storefront::resources::ListResponse;
///
/// let page: ListResponse<u32> = serde_json::from_str(
///     r#"{"count": 3, "next": "http://x/api/v1/products/?page=2", "previous": null, "results": [1, 2]}"#,
/// ).unwrap();
/// assert_eq!(page.len(), 2);
/// assert!(page.has_next());
///
/// let bare: ListResponse<u32> = serde_json::from_str("[7, 8, 9]").unwrap();
/// assert_eq!(bare.count, 3);
/// assert!(!bare.has_next());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListResponse<T> {
    /// Total number of results across all pages.
    pub count: u64,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// Results of this page.
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Wraps a plain list of results into a single-page envelope.
    #[must_use]
    pub fn from_results(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }

    /// Returns `true` if the backend reports a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Consumes the envelope and returns the results.
    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self::from_results(Vec::new())
    }
}

impl<T> Deref for ListResponse<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.results
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList<T> {
    Envelope {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<'de, T> Deserialize<'de> for ListResponse<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawList::deserialize(deserializer)? {
            RawList::Envelope {
                count,
                next,
                previous,
                results,
            } => Self {
                count: count.unwrap_or(results.len() as u64),
                next,
                previous,
                results,
            },
            RawList::Bare(results) => Self::from_results(results),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decoding() {
        let page: ListResponse<String> = serde_json::from_str(
            r#"{"count": 12, "next": null, "previous": "p", "results": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(page.count, 12);
        assert_eq!(page.previous.as_deref(), Some("p"));
        assert!(!page.has_next());
        assert_eq!(page.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_envelope_without_results_is_empty() {
        let page: ListResponse<String> = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn test_default_is_empty_page() {
        let page: ListResponse<u8> = ListResponse::default();
        assert_eq!(page.count, 0);
        assert!(page.into_results().is_empty());
    }
}
