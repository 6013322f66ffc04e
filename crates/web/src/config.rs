use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub supabase_url: String,
    pub supabase_key: String,
    pub admin_passphrases: String,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            supabase_url: std::env::var("SUPABASE_URL")
                .context("Cannot load SUPABASE_URL env variable")?,
            supabase_key: std::env::var("SUPABASE_ANON_KEY")
                .context("Cannot load SUPABASE_ANON_KEY env variable")?,
            admin_passphrases: std::env::var("ADMIN_PASSPHRASES").unwrap_or_default(),
            backend_timeout: match std::env::var("BACKEND_TIMEOUT_SECS") {
                Ok(secs) => Duration::from_secs(
                    secs.parse()
                        .context("BACKEND_TIMEOUT_SECS must be a number of seconds")?,
                ),
                Err(_) => Duration::from_secs(30),
            },
        })
    }
}
