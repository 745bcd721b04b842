//! Method channel - dispatches named calls to handlers
//!
//! A call carries a method name and JSON arguments; every call yields exactly
//! one [`MethodResult`]. Unknown methods answer [`MethodResult::NotImplemented`].

mod handlers;
mod transport;

pub use handlers::{BundleIdentifierMethod, OpenUrlMethod, ParametersMethod};
pub use transport::serve;

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::Result;
use crate::auth::{ParameterGenerator, SecureRandomSource};
use crate::platform::{AppIdentifierProvider, BrowserPresenter};

/// Default channel name
pub const CHANNEL_NAME: &str = "org.sya/flutter_auth0";

/// An incoming method call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Correlation id, echoed back on stream transports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub method: String,

    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: None,
            method: method.into(),
            arguments,
        }
    }
}

/// Outcome of a method call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResult {
    Success {
        result: Value,
    },
    Error {
        code: String,
        message: String,
    },
    NotImplemented,
}

impl MethodResult {
    pub fn success(result: Value) -> Self {
        MethodResult::Success { result }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        MethodResult::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResult::Success { .. })
    }
}

impl From<crate::Error> for MethodResult {
    fn from(err: crate::Error) -> Self {
        MethodResult::error(err.code(), err.to_string())
    }
}

/// Handler for one named method
pub trait MethodHandler: Send + Sync {
    /// Method name callers dispatch on
    fn name(&self) -> &str;

    fn handle(&self, arguments: &Value) -> Result<Value>;
}

/// Routes calls to registered handlers by method name
pub struct MethodChannel {
    name: String,
    handlers: HashMap<String, Box<dyn MethodHandler>>,
}

impl MethodChannel {
    /// Create an empty channel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: HashMap::new(),
        }
    }

    /// Create a channel serving `parameters`, `openUrl` and `bundleIdentifier`
    pub fn standard<R, B, A>(
        name: impl Into<String>,
        generator: ParameterGenerator<R>,
        browser: B,
        identity: A,
    ) -> Self
    where
        R: SecureRandomSource + 'static,
        B: BrowserPresenter + 'static,
        A: AppIdentifierProvider + 'static,
    {
        let mut channel = Self::new(name);
        channel.register(ParametersMethod::new(generator));
        channel.register(OpenUrlMethod::new(browser));
        channel.register(BundleIdentifierMethod::new(identity));
        channel
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a handler, replacing any handler with the same name
    pub fn register<H: MethodHandler + 'static>(&mut self, handler: H) {
        self.handlers.insert(handler.name().to_string(), Box::new(handler));
    }

    /// Check if a method is registered
    pub fn has(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// List registered method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Dispatch a call
    pub fn invoke(&self, call: &MethodCall) -> MethodResult {
        let Some(handler) = self.handlers.get(&call.method) else {
            tracing::debug!("{}: method not implemented: {}", self.name, call.method);
            return MethodResult::NotImplemented;
        };

        tracing::debug!("{}: dispatching {}", self.name, call.method);
        match handler.handle(&call.arguments) {
            Ok(result) => MethodResult::success(result),
            Err(e) => {
                tracing::warn!("{}: {} failed: {}", self.name, call.method, e);
                e.into()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;
    use url::Url;
    use crate::Result;
    use crate::error::Error;
    use crate::platform::BrowserPresenter;

    /// Records presented URLs instead of opening them
    #[derive(Default)]
    pub struct RecordingBrowser {
        pub opened: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl BrowserPresenter for RecordingBrowser {
        fn present(&self, url: &Url) -> Result<()> {
            if self.fail {
                return Err(Error::Browser("no browser".to_string()));
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }
}
