use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Scheme, host and port of a URL
///
/// Two URLs are same-origin when all three components match; the port is
/// compared after applying the scheme's default, so `http://a:80/` and
/// `http://a/` share an origin. This is stricter than scheme and host alone:
/// servers on different ports of one host are different origins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Derives the origin of an http(s) URL
    ///
    /// # Examples
    ///
    /// ```
    /// use pagechain::url::Origin;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://EXAMPLE.com:5000/page_0.html").unwrap();
    /// let origin = Origin::of(&url).unwrap();
    /// assert_eq!(origin.to_string(), "http://example.com:5000");
    /// ```
    pub fn of(url: &Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| UrlError::MissingHost(url.to_string()))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_lowercase(),
            port: url.port_or_known_default(),
        })
    }

    /// Parses a URL string and derives its origin
    pub fn parse(url: &str) -> UrlResult<Self> {
        let url = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::of(&url)
    }

    /// Returns true if `url` belongs to this origin
    pub fn contains(&self, url: &Url) -> bool {
        Self::of(url).map(|other| &other == self).unwrap_or(false)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_port = match self.scheme.as_str() {
            "http" => Some(80),
            "https" => Some(443),
            _ => None,
        };

        match self.port {
            Some(port) if Some(port) != default_port => {
                write!(f, "{}://{}:{}", self.scheme, self.host, port)
            }
            _ => write!(f, "{}://{}", self.scheme, self.host),
        }
    }
}
