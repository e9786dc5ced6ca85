use crate::url::parse_url;
use crate::UrlError;

const ROBOTS_FILE: &str = "robots.txt";

/// Where a site's robots.txt lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsLocation {
    robots_url: String,
    domain: String,
}

impl RobotsLocation {
    /// Full URL of the robots.txt resource
    pub fn robots_url(&self) -> &str {
        &self.robots_url
    }

    /// Site root, always ending in `/`
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn into_parts(self) -> (String, String) {
        (self.robots_url, self.domain)
    }
}

/// Derives the robots.txt URL and site root from any URL on the site
///
/// The path, query and fragment are taken from the input exactly as written
/// and replaced with `/robots.txt`. Scheme, host and port are kept verbatim,
/// so the domain is not normalized.
///
/// # Arguments
///
/// * `site_url` - A site root or any page URL on the site
///
/// # Returns
///
/// * `Ok(RobotsLocation)` - The robots.txt URL and the `/`-terminated domain
/// * `Err(UrlError)` - The input does not parse as a URL
///
/// # Examples
///
/// ```
/// use robots_scope::url::derive_robots_location;
///
/// let location = derive_robots_location("http://example.com/about.htm").unwrap();
/// assert_eq!(location.domain(), "http://example.com/");
/// assert_eq!(location.robots_url(), "http://example.com/robots.txt");
/// ```
pub fn derive_robots_location(site_url: &str) -> Result<RobotsLocation, UrlError> {
    let site_url = site_url.trim();
    parse_url(site_url)?;

    let file = file_part(site_url);
    let domain = match file {
        "" => format!("{}/", site_url),
        "/" => site_url.to_string(),
        _ => format!("{}/", &site_url[..site_url.len() - file.len()]),
    };
    let robots_url = format!("{}{}", domain, ROBOTS_FILE);

    Ok(RobotsLocation { robots_url, domain })
}

/// Returns everything after the authority: path, query and fragment as written
fn file_part(raw: &str) -> &str {
    let rest_start = match raw.find("://") {
        Some(i) => i + 3,
        None => raw.find(':').map_or(0, |i| i + 1),
    };
    let rest = &raw[rest_start..];
    match rest.find(|c: char| matches!(c, '/' | '?' | '#')) {
        Some(i) => &rest[i..],
        None => "",
    }
}
