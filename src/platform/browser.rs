//! System browser presenter backed by the `open` crate

use url::Url;
use crate::Result;
use crate::error::Error;
use super::BrowserPresenter;

/// Opens URLs in a browser application
///
/// With no application configured the OS default URL handler is used.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    app: Option<String>,
}

impl SystemBrowser {
    pub fn new() -> Self {
        Self { app: None }
    }

    /// Open URLs with a specific browser application
    pub fn with_app(app: impl Into<String>) -> Self {
        Self { app: Some(app.into()) }
    }

    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }
}

impl BrowserPresenter for SystemBrowser {
    fn present(&self, url: &Url) -> Result<()> {
        let result = match &self.app {
            Some(app) => {
                tracing::debug!("Opening {} with {}", url, app);
                open::with(url.as_str(), app)
            }
            None => {
                tracing::debug!("Opening {} with default handler", url);
                open::that(url.as_str())
            }
        };

        result.map_err(|e| {
            tracing::warn!("Failed to open browser: {}", e);
            Error::Browser(format!("Failed to open {}: {}", url, e))
        })
    }
}

/// Parse and validate a URL destined for the browser
///
/// Only `http` and `https` URLs are accepted.
pub fn parse_browser_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::InvalidArguments(format!("Invalid url {:?}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidArguments(format!(
            "Unsupported url scheme: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let url = parse_browser_url("https://example.auth0.com/authorize?client_id=abc").unwrap();
        assert_eq!(url.host_str(), Some("example.auth0.com"));
        assert_eq!(url.path(), "/authorize");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let url = parse_browser_url("  http://localhost:3000/login \n").unwrap();
        assert_eq!(url.port(), Some(3000));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let err = parse_browser_url("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert!(err.to_string().contains("file"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_browser_url("not a url").is_err());
        assert!(parse_browser_url("").is_err());
    }

    #[test]
    fn test_browser_app() {
        assert_eq!(SystemBrowser::new().app(), None);
        assert_eq!(SystemBrowser::with_app("firefox").app(), Some("firefox"));
    }
}
