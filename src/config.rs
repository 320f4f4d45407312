use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default OpenAI-compatible embeddings endpoint.
pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1/embeddings";

/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Vector dimension produced by text-embedding-3-small.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Per-call provider timeout. Expiry counts as a provider failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding provider credential (OPENAI_API_KEY). Empty means no credential.
    pub openai_api_key: String,
    pub embedding_url: String,
    pub embedding_model: String,
    /// Dimension the provider is expected to return; also the size of
    /// substitute vectors handed out when a lookup can't reach the provider.
    pub embedding_dim: usize,
    pub embedding_timeout: Duration,
    /// Explicit capability flag: may this process call the embedding provider at all?
    pub provider_access: bool,
    pub bind: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; a missing credential is not an error here
    /// because the scorer degrades to fallback scoring without one.
    pub fn load() -> Result<Self> {
        let embedding_dim = match env::var("PICKTLE_EMBEDDING_DIM") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("PICKTLE_EMBEDDING_DIM is not a number: {raw:?}"))?,
            Err(_) => DEFAULT_EMBEDDING_DIM,
        };
        if embedding_dim == 0 {
            anyhow::bail!("PICKTLE_EMBEDDING_DIM must be greater than zero");
        }

        let timeout_secs = match env::var("PICKTLE_EMBEDDING_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("PICKTLE_EMBEDDING_TIMEOUT_SECS is not a number: {raw:?}")
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let port = match env::var("PICKTLE_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PICKTLE_PORT is not a valid port: {raw:?}"))?,
            Err(_) => 3000,
        };

        let provider_access = env::var("PICKTLE_PROVIDER_ACCESS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            embedding_url: env::var("PICKTLE_EMBEDDING_URL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_URL.to_string()),
            embedding_model: env::var("PICKTLE_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_dim,
            embedding_timeout: Duration::from_secs(timeout_secs),
            provider_access,
            bind: env::var("PICKTLE_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
        })
    }

    /// True when the embedding provider may be called: the capability flag
    /// is on and a non-blank credential is configured.
    pub fn has_provider_access(&self) -> bool {
        self.provider_access && !self.openai_api_key.trim().is_empty()
    }

    /// Check that semantic scoring is available.
    /// Call this before any operation that refuses to run on fallback scores.
    pub fn require_provider(&self) -> Result<()> {
        if !self.provider_access {
            anyhow::bail!(
                "Embedding provider access is disabled (PICKTLE_PROVIDER_ACCESS).\n\
                 Unset it or set it to `true` to enable semantic scoring."
            );
        }
        if self.openai_api_key.trim().is_empty() {
            anyhow::bail!(
                "OPENAI_API_KEY not set. Add it to your .env file.\n\
                 Without it, guesses are scored with the fallback heuristic."
            );
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            embedding_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            provider_access: true,
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Parse a boolean-ish env flag. Anything other than an explicit "off" value enables it.
fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
