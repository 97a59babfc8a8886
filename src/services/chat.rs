use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Fixed assistant behavior / safety preamble sent ahead of every
/// conversation. The client never overrides this.
pub const SYSTEM_PREAMBLE: &str = "You are a gentle, supportive companion inside a private \
journaling app. Listen, reflect feelings back, and suggest small concrete steps. You are not \
a therapist and must say so when asked for clinical advice. If the user mentions self-harm or \
harming others, respond with care and encourage them to contact local emergency services or a \
crisis line such as 988 (US). Keep replies short and warm.";

/// Canned reply when the hosted model is unreachable. Points at real support
/// resources instead of failing the conversation.
pub const FALLBACK_MESSAGE: &str = "I'm having trouble connecting right now. I'm still here \
with you. If you need support this moment, please reach out to someone you trust, or call or \
text 988 (Suicide & Crisis Lifeline, US) — you don't have to carry this alone. Your journal \
is always a safe place to keep writing.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Send an ordered message list to the hosted chat model and return the
/// single assistant reply text.
pub async fn complete(config: &Config, messages: &[ChatMessage]) -> Result<String, anyhow::Error> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let response = client
        .post("https://api.anthropic.com/v1/messages")
        .header("x-api-key", &config.claude_api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": config.claude_model,
            "max_tokens": 1024,
            "system": SYSTEM_PREAMBLE,
            "messages": messages,
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Claude API error {}: {}", status, body);
    }

    let claude_response: serde_json::Value = response.json().await?;
    let text = claude_response["content"][0]["text"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Claude response missing content text"))?;

    Ok(text.to_string())
}
