//! Built-in method handlers

use serde_json::Value;
use crate::Result;
use crate::error::Error;
use crate::auth::{OsRandom, ParameterGenerator, SecureRandomSource};
use crate::platform::{parse_browser_url, AppIdentifierProvider, BrowserPresenter};
use super::MethodHandler;

/// `parameters` - returns a fresh PKCE parameter set
pub struct ParametersMethod<R = OsRandom> {
    generator: ParameterGenerator<R>,
}

impl<R: SecureRandomSource> ParametersMethod<R> {
    pub fn new(generator: ParameterGenerator<R>) -> Self {
        Self { generator }
    }
}

impl<R: SecureRandomSource> MethodHandler for ParametersMethod<R> {
    fn name(&self) -> &str {
        "parameters"
    }

    fn handle(&self, _arguments: &Value) -> Result<Value> {
        let params = self.generator.generate()?;
        Ok(Value::Object(params.to_map()))
    }
}

/// `openUrl` - presents `arguments.url` in a browser
pub struct OpenUrlMethod<B> {
    browser: B,
}

impl<B: BrowserPresenter> OpenUrlMethod<B> {
    pub fn new(browser: B) -> Self {
        Self { browser }
    }
}

impl<B: BrowserPresenter> MethodHandler for OpenUrlMethod<B> {
    fn name(&self) -> &str {
        "openUrl"
    }

    fn handle(&self, arguments: &Value) -> Result<Value> {
        let raw = arguments
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidArguments("Missing string argument 'url'".to_string()))?;

        let url = parse_browser_url(raw)?;
        self.browser.present(&url)?;
        tracing::info!("Presented {} in browser", url.origin().ascii_serialization());
        Ok(Value::Null)
    }
}

/// `bundleIdentifier` - returns the application identifier
pub struct BundleIdentifierMethod<A> {
    identity: A,
}

impl<A: AppIdentifierProvider> BundleIdentifierMethod<A> {
    pub fn new(identity: A) -> Self {
        Self { identity }
    }
}

impl<A: AppIdentifierProvider> MethodHandler for BundleIdentifierMethod<A> {
    fn name(&self) -> &str {
        "bundleIdentifier"
    }

    fn handle(&self, _arguments: &Value) -> Result<Value> {
        let id = self.identity.bundle_identifier()?;
        if id.is_empty() {
            return Err(Error::Platform("Empty bundle identifier".to_string()));
        }
        Ok(Value::String(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::test_support::RecordingBrowser;
    use serde_json::json;

    struct EmptyIdentity;

    impl AppIdentifierProvider for EmptyIdentity {
        fn bundle_identifier(&self) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_parameters_ignores_arguments() {
        let method = ParametersMethod::new(ParameterGenerator::new());
        let value = method.handle(&json!({"unexpected": true})).unwrap();

        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 4);
        for key in ["verifier", "code_challenge", "code_challenge_method", "state"] {
            assert!(map.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_consecutive_parameter_calls_differ() {
        let method = ParametersMethod::new(ParameterGenerator::new());
        let a = method.handle(&Value::Null).unwrap();
        let b = method.handle(&Value::Null).unwrap();
        assert_ne!(a["verifier"], b["verifier"]);
        assert_ne!(a["state"], b["state"]);
    }

    #[test]
    fn test_open_url_rejects_non_string() {
        let method = OpenUrlMethod::new(RecordingBrowser::default());
        let err = method.handle(&json!({"url": 42})).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[test]
    fn test_open_url_rejects_bad_scheme() {
        let method = OpenUrlMethod::new(RecordingBrowser::default());
        let err = method.handle(&json!({"url": "javascript:alert(1)"})).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
        assert!(method.browser.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_identifier_is_error() {
        let method = BundleIdentifierMethod::new(EmptyIdentity);
        let err = method.handle(&Value::Null).unwrap_err();
        assert!(matches!(err, Error::Platform(_)));
    }
}
