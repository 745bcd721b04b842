//! authbridge - native bridge for browser-based OAuth2 with PKCE
//!
//! This library generates PKCE parameters, opens authentication URLs in a
//! browser and reports the application identifier, all behind a method
//! channel that hosts dispatch into by method name.

pub mod auth;
pub mod channel;
pub mod config;
pub mod error;
pub mod platform;
pub mod ui;

pub use auth::{generate_parameters, PkceParameters};
pub use error::{Error, Result};
