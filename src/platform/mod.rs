//! Platform capabilities consumed by the method channel
//!
//! - [`BrowserPresenter`] hands an authentication URL to a browser
//! - [`AppIdentifierProvider`] reports the application's bundle identifier

mod browser;
mod identity;

pub use browser::{parse_browser_url, SystemBrowser};
pub use identity::AppIdentity;

use url::Url;
use crate::Result;

/// Displays an authentication page for the given URL
pub trait BrowserPresenter: Send + Sync {
    fn present(&self, url: &Url) -> Result<()>;
}

/// Looks up the calling application's unique bundle/package name
pub trait AppIdentifierProvider: Send + Sync {
    fn bundle_identifier(&self) -> Result<String>;
}

impl<T: BrowserPresenter + ?Sized> BrowserPresenter for std::sync::Arc<T> {
    fn present(&self, url: &Url) -> Result<()> {
        (**self).present(url)
    }
}

impl<T: AppIdentifierProvider + ?Sized> AppIdentifierProvider for std::sync::Arc<T> {
    fn bundle_identifier(&self) -> Result<String> {
        (**self).bundle_identifier()
    }
}
