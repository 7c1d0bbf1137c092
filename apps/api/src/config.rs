use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/express_form_db";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every value has a local default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Directory receiving uploaded attachments, served under `/uploads`.
    pub upload_dir: PathBuf,
    /// Directory of static assets served for unmatched GET paths.
    pub public_dir: PathBuf,
    /// Landing page served at `/`.
    pub index_file: PathBuf,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            upload_dir: env_or("UPLOAD_DIR", "uploads").into(),
            public_dir: env_or("PUBLIC_DIR", "public").into(),
            index_file: env_or("INDEX_FILE", "index.html").into(),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
impl Config {
    /// Config rooted in a scratch directory, for router tests.
    pub fn for_tests(root: &std::path::Path) -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: 0,
            upload_dir: root.join("uploads"),
            public_dir: root.join("public"),
            index_file: root.join("index.html"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rust_log: "debug".to_string(),
        }
    }
}
