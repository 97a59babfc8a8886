use std::env;

/// Historical shared journal passphrase. Every installation of the original
/// client shipped this same constant, so a store written by it can only be
/// read with this exact value. Override with JOURNAL_KEY to rotate.
const DEFAULT_JOURNAL_KEY: &str = "aura-journal-at-rest-v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    /// Passphrase the entry cipher derives its key from.
    pub journal_key: String,

    /// Streak lookback cap in days. None scans back until the first gap.
    pub streak_lookback_days: Option<u32>,

    pub claude_api_key: String,
    pub claude_model: String,

    pub quote_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            journal_key: env::var("JOURNAL_KEY").unwrap_or_else(|_| DEFAULT_JOURNAL_KEY.into()),

            streak_lookback_days: env::var("STREAK_LOOKBACK_DAYS")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| s.parse().expect("STREAK_LOOKBACK_DAYS must be a number")),

            claude_api_key: env::var("CLAUDE_API_KEY").unwrap_or_else(|_| String::new()),
            claude_model: env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".into()),

            quote_url: env::var("QUOTE_URL")
                .unwrap_or_else(|_| "https://stoic.tekloon.net/stoic-quote".into()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
