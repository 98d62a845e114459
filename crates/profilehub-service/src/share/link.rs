//! Share link token generation and public URL building.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Random bytes per token: 256 bits of entropy.
pub const TOKEN_BYTES: usize = 32;

/// Longest token the resolver will look up. Generated tokens are 43 chars.
pub const MAX_TOKEN_LEN: usize = 128;

/// Generates share tokens and the URLs that carry them.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Origin the public share page is served from, without trailing slash.
    base_url: String,
}

impl LinkService {
    /// Creates a new link service for the given public origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Generates a URL-safe token from the operating system CSPRNG.
    pub fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Public URL at which `token` resolves.
    pub fn share_url(&self, token: &str) -> String {
        format!("{}/profile/share/{}", self.base_url, token)
    }

    /// Whether `token` is worth a store lookup at all.
    pub fn is_plausible_token(token: &str) -> bool {
        !token.trim().is_empty() && token.len() <= MAX_TOKEN_LEN
    }
}
