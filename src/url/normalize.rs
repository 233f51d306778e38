use crate::{UrlError, UrlResult};
use url::Url;

/// Reduces a URL to the form used as a visited-set key
///
/// The `url` crate already lowercases the host, drops default ports and turns
/// an empty path into `/`; on top of that the fragment is removed, since two
/// links differing only in `#section` fetch the same page.
///
/// # Examples
///
/// ```
/// use pagechain::url::canonicalize;
/// use url::Url;
///
/// let url = Url::parse("HTTP://Example.COM:80/page_1.html#top").unwrap();
/// assert_eq!(canonicalize(&url).as_str(), "http://example.com/page_1.html");
/// ```
pub fn canonicalize(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_fragment(None);
    canonical
}

/// Parses a string and returns its canonical http(s) form
pub fn parse_canonical(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(canonicalize(&url))
}
