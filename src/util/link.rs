use thiserror::Error;
use url::Url;

/// Longest link handed to the system opener.
const MAX_LINK_LENGTH: usize = 2048;

/// Reasons a card link is refused before it reaches the browser.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("URL too long ({0} bytes)")]
    TooLong(usize),
}

/// Check a link from content data before passing it to `open::that`.
///
/// Only absolute `http`/`https` URLs with a host are accepted, so a crafted
/// item cannot launch local files or custom protocol handlers.
///
/// ```
/// use contenthub::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://example.com/story/1").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, LinkError> {
    if url_str.len() > MAX_LINK_LENGTH {
        return Err(LinkError::TooLong(url_str.len()));
    }

    let url = Url::parse(url_str.trim())?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(LinkError::MissingHost);
    }
    Ok(url)
}
