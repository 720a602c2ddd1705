//! Search terms derived from service names

use url::{Host, Url};

/// Registrable domain of a URL-shaped service name.
///
/// Scheme, credentials, port, path and query are dropped and only the last
/// two labels of the host are kept. Anything that is not a URL with a host
/// comes back unchanged, as do IP addresses.
pub fn extract_domain_name(service: &str) -> String {
    let Ok(url) = Url::parse(service) else {
        return service.to_string();
    };

    match url.host() {
        Some(Host::Domain(host)) => {
            let labels: Vec<&str> = host.split('.').collect();
            labels[labels.len().saturating_sub(2)..].join(".")
        }
        Some(host) => host.to_string(),
        None => service.to_string(),
    }
}
