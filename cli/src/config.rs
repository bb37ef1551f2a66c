use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use std::path::PathBuf;

use sous_core::generation::RetryPolicy;
use sous_core::store::PersistentStore;

pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";

pub struct Config {
    pub db_path: PathBuf,
    pub inference: InferenceConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();

        let proj_dirs =
            ProjectDirs::from("", "", "sous").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("sous.db");
        let inference = InferenceConfig::from_vars(|key| std::env::var(key).ok())?;

        Ok(Config { db_path, inference })
    }

    pub fn open_store(&self) -> Result<PersistentStore> {
        PersistentStore::open(&self.db_path)
    }
}

/// Settings for the hosted chat-completion API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub api_base: String,
    pub model: String,
    pub access_token: Option<String>,
    pub max_attempts: u32,
}

impl InferenceConfig {
    /// Build from environment-style lookups:
    /// `HF_ACCESS_TOKEN`, `SOUS_API_BASE`, `SOUS_MODEL`, `SOUS_MAX_ATTEMPTS`.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let max_attempts = match non_empty("SOUS_MAX_ATTEMPTS") {
            Some(raw) => {
                let n: u32 = raw
                    .parse()
                    .with_context(|| format!("Invalid SOUS_MAX_ATTEMPTS '{raw}'"))?;
                if n == 0 {
                    bail!("SOUS_MAX_ATTEMPTS must be at least 1");
                }
                n
            }
            None => RetryPolicy::default().max_attempts,
        };

        Ok(Self {
            api_base: non_empty("SOUS_API_BASE")
                .map_or_else(|| DEFAULT_API_BASE.to_string(), |b| b.trim_end_matches('/').to_string()),
            model: non_empty("SOUS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            access_token: non_empty("HF_ACCESS_TOKEN"),
            max_attempts,
        })
    }

    pub fn require_token(&self) -> Result<&str> {
        self.access_token.as_deref().context(
            "HF_ACCESS_TOKEN is not set. Export it or add it to a .env file to generate recipes",
        )
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_max_attempts(self.max_attempts)
    }
}
