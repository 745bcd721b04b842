//! PKCE (Proof Key for Code Exchange) parameter generation
//!
//! Implements the S256 method of RFC 7636: a random verifier, its hashed
//! code challenge and an independent random `state` token.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use crate::Result;
use crate::error::Error;

/// Number of random bytes behind the verifier and the state (43 chars encoded)
pub const RANDOM_VALUE_BYTES: usize = 32;

/// Source of cryptographically secure random bytes
///
/// Implementations must be safe to share between threads.
pub trait SecureRandomSource: Send + Sync {
    /// Fill `dest` entirely with secure random bytes
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(dest).map_err(|e| {
            tracing::error!("OS random source failed: {}", e);
            Error::from(e)
        })
    }
}

/// Code challenge method; only S256 is ever produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChallengeMethod {
    #[default]
    S256,
}

impl ChallengeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeMethod::S256 => "S256",
        }
    }
}

/// One set of PKCE parameters for a single authorization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkceParameters {
    /// Secret kept by the client and sent with the token request
    pub verifier: String,

    /// `BASE64URL(SHA256(ASCII(verifier)))`
    pub code_challenge: String,

    pub code_challenge_method: ChallengeMethod,

    /// CSRF token, generated independently of the verifier
    pub state: String,
}

impl PkceParameters {
    /// Check that the challenge matches the verifier
    pub fn verify(&self) -> bool {
        self.code_challenge_method == ChallengeMethod::S256
            && generate_code_challenge(&self.verifier) == self.code_challenge
    }

    /// String-keyed mapping sent back over the method channel
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("verifier".into(), Value::String(self.verifier.clone()));
        map.insert("code_challenge".into(), Value::String(self.code_challenge.clone()));
        map.insert(
            "code_challenge_method".into(),
            Value::String(self.code_challenge_method.as_str().to_string()),
        );
        map.insert("state".into(), Value::String(self.state.clone()));
        map
    }
}

/// Generates [`PkceParameters`] from an injected random source
#[derive(Debug, Clone, Default)]
pub struct ParameterGenerator<R = OsRandom> {
    source: R,
}

impl ParameterGenerator<OsRandom> {
    /// Generator backed by the OS random source
    pub fn new() -> Self {
        Self { source: OsRandom }
    }
}

impl<R: SecureRandomSource> ParameterGenerator<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }

    /// Generate a fresh parameter set
    ///
    /// The verifier is drawn before the state. A failing random source aborts
    /// the whole call with [`crate::Error::Entropy`].
    pub fn generate(&self) -> Result<PkceParameters> {
        let verifier = self.random_value()?;
        let code_challenge = generate_code_challenge(&verifier);
        let state = self.random_value()?;

        Ok(PkceParameters {
            verifier,
            code_challenge,
            code_challenge_method: ChallengeMethod::S256,
            state,
        })
    }

    fn random_value(&self) -> Result<String> {
        let mut bytes = [0u8; RANDOM_VALUE_BYTES];
        self.source.fill(&mut bytes)?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

/// Generate a parameter set using the OS random source
pub fn generate_parameters() -> Result<PkceParameters> {
    ParameterGenerator::new().generate()
}

/// Generate a code challenge from the code verifier
///
/// Uses S256 method: BASE64URL(SHA256(code_verifier)). Base64url output is
/// pure ASCII, so the UTF-8 bytes of the verifier are its ASCII bytes.
pub fn generate_code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}
