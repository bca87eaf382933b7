//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative href against a base URL.
///
/// Absolute hrefs pass through unchanged, root-relative hrefs pick up the
/// base origin, and bare-relative hrefs are joined onto the base path.
///
/// ```
/// use url::Url;
/// use empleo_monitor::utils::resolve_url;
///
/// let base = Url::parse("https://www.santafe.gob.ar/simtyss/portalempleo/ofertas/").unwrap();
/// assert_eq!(resolve_url(&base, "5"), "https://www.santafe.gob.ar/simtyss/portalempleo/ofertas/5");
/// assert_eq!(resolve_url(&base, "/ofertas/5"), "https://www.santafe.gob.ar/ofertas/5");
/// ```
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_base() -> Url {
        Url::parse("https://www.santafe.gob.ar/simtyss/portalempleo/ofertas/").unwrap()
    }

    #[test]
    fn test_absolute_href_unchanged() {
        assert_eq!(
            resolve_url(&search_base(), "https://x.com/a"),
            "https://x.com/a"
        );
    }

    #[test]
    fn test_root_relative_gets_origin() {
        assert_eq!(
            resolve_url(&search_base(), "/ofertas/5"),
            "https://www.santafe.gob.ar/ofertas/5"
        );
    }

    #[test]
    fn test_bare_relative_joins_search_path() {
        assert_eq!(
            resolve_url(&search_base(), "5"),
            "https://www.santafe.gob.ar/simtyss/portalempleo/ofertas/5"
        );
    }
}
