use serde::{Deserialize, Serialize};

use crate::config::Config;

pub const FALLBACK_QUOTE: &str =
    "You do not rise to the level of your goals. You fall to the level of your systems.";
pub const FALLBACK_AUTHOR: &str = "James Clear";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

impl Quote {
    pub fn fallback() -> Self {
        Self {
            quote: FALLBACK_QUOTE.into(),
            author: FALLBACK_AUTHOR.into(),
        }
    }
}

/// Fetch the quote of the day. Any failure — network, status, shape — falls
/// back to the hardcoded quote rather than erroring the screen.
pub async fn quote_of_the_day(config: &Config) -> Quote {
    match fetch(config).await {
        Ok(quote) => quote,
        Err(e) => {
            tracing::warn!(error = %e, "quote endpoint unavailable, using fallback");
            Quote::fallback()
        }
    }
}

async fn fetch(config: &Config) -> Result<Quote, anyhow::Error> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let quote = client
        .get(&config.quote_url)
        .send()
        .await?
        .error_for_status()?
        .json::<Quote>()
        .await?;

    Ok(quote)
}
