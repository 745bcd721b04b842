//! Authentication module for OAuth2 PKCE
//!
//! This module provides:
//! - PKCE parameter generation (verifier, S256 challenge, state)
//! - The [`SecureRandomSource`] seam for injecting entropy

mod pkce;

pub use pkce::{
    generate_code_challenge, generate_parameters, ChallengeMethod, OsRandom, ParameterGenerator,
    PkceParameters, SecureRandomSource, RANDOM_VALUE_BYTES,
};
