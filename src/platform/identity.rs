//! Application identifier lookup

use crate::Result;
use crate::error::Error;
use super::AppIdentifierProvider;

/// Bundle identifier from configuration, or the running executable's name
#[derive(Debug, Clone, Default)]
pub struct AppIdentity {
    configured: Option<String>,
}

impl AppIdentity {
    pub fn new(configured: Option<String>) -> Self {
        let configured = configured
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Self { configured }
    }

    fn executable_name() -> Result<String> {
        let exe = std::env::current_exe()?;
        exe.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| Error::Platform(format!("Cannot derive identifier from {:?}", exe)))
    }
}

impl AppIdentifierProvider for AppIdentity {
    fn bundle_identifier(&self) -> Result<String> {
        match &self.configured {
            Some(id) => Ok(id.clone()),
            None => Self::executable_name(),
        }
    }
}
