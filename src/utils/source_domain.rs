//! Source-domain extraction from recipe origin URLs.

use url::Url;

/// Extracts the source domain from a recipe's origin URL.
///
/// Returns the lower-cased host with any leading `www.` stripped, so quota
/// accounting treats `www.example.com` and `example.com` as one source.
/// Returns `None` for unparsable URLs, URLs without a host, and IP-address
/// hosts — a recipe with no attributable source domain is not quota-limited.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     extract_source_domain("https://www.greenchef.com/recipes/123"),
///     Some("greenchef.com".to_string())
/// );
/// assert_eq!(extract_source_domain("not a url"), None);
/// ```
pub fn extract_source_domain(source_url: &str) -> Option<String> {
    let parsed = Url::parse(source_url).ok()?;

    let host = match parsed.host()? {
        url::Host::Domain(d) => d.to_ascii_lowercase(),
        // IP-hosted sources carry no meaningful attribution.
        url::Host::Ipv4(_) | url::Host::Ipv6(_) => return None,
    };

    let domain = host.strip_prefix("www.").unwrap_or(&host);
    if domain.is_empty() {
        return None;
    }

    Some(domain.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        assert_eq!(
            extract_source_domain("https://example.com/recipes/soup"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_strips_www() {
        assert_eq!(
            extract_source_domain("https://www.greenchef.com/recipes/123"),
            Some("greenchef.com".to_string())
        );
    }

    #[test]
    fn test_extract_keeps_subdomain() {
        assert_eq!(
            extract_source_domain("https://recipes.example.com/pasta"),
            Some("recipes.example.com".to_string())
        );
    }

    #[test]
    fn test_extract_lowercases_host() {
        assert_eq!(
            extract_source_domain("https://Example.COM/dish"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port_and_query() {
        assert_eq!(
            extract_source_domain("http://example.com:8080/r?id=5"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_invalid_url_returns_none() {
        assert_eq!(extract_source_domain("not a url"), None);
        assert_eq!(extract_source_domain(""), None);
    }

    #[test]
    fn test_ip_host_returns_none() {
        assert_eq!(extract_source_domain("http://192.168.1.1/recipe"), None);
        assert_eq!(extract_source_domain("http://[::1]/recipe"), None);
    }
}
