use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analytics::{current_streak, overall_average, DatedValue, Polarity};
use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::handlers::entries::{fetch_decoded, DecodedEntry};
use crate::models::mood;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
    pub summary: String,
    pub observations: Vec<String>,
    pub suggestions: Vec<String>,
    pub streak_note: String,
    #[serde(default)]
    pub source: String, // "claude" or "fallback"
}

pub async fn get_insights(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<InsightResponse>> {
    let today = Utc::now().date_naive();
    let thirty_days_ago = today - chrono::Duration::days(30);

    let entries = fetch_decoded(&state, &auth_user.id).await?;
    let recent: Vec<DecodedEntry> = entries
        .into_iter()
        .filter(|e| e.date_key.map_or(false, |d| d >= thirty_days_ago))
        .collect();

    let days: std::collections::HashSet<_> = recent.iter().filter_map(|e| e.date_key).collect();
    let streak = current_streak(&days, today, state.config.streak_lookback_days);

    let mood_values: Vec<DatedValue> = recent
        .iter()
        .filter_map(|e| {
            Some(DatedValue {
                date_key: e.date_key?,
                value: mood::mood_value(&e.entry.mood)?,
            })
        })
        .collect();
    let avg_mood = overall_average(&mood_values);

    let mut positive = 0usize;
    let mut negative = 0usize;
    for e in &recent {
        match state.sentiment.classify(&e.entry.text) {
            Polarity::Positive => positive += 1,
            Polarity::Negative => negative += 1,
            Polarity::Neutral => {}
        }
    }

    let prompt = format!(
        r#"You are a reflective journaling coach. Analyze this user's last 30 days of journaling and respond with gentle, specific insights.

Entries written: {}
Days journaled: {}
Current streak: {} days
Average mood (0-5 scale): {}
Entries with positive tone: {}
Entries with negative tone: {}

Provide a JSON response with this exact schema:
{{
  "summary": "2-3 sentence reflection on the period",
  "observations": ["specific pattern 1", "specific pattern 2"],
  "suggestions": ["gentle actionable suggestion 1", "gentle actionable suggestion 2"],
  "streak_note": "one sentence about their journaling consistency"
}}"#,
        recent.len(),
        days.len(),
        streak,
        avg_mood
            .map(|m| format!("{m:.2}"))
            .unwrap_or_else(|| "no mood data".into()),
        positive,
        negative,
    );

    // Try Claude, fall back to deterministic insights if unavailable.
    let insight = match call_claude(&state, &prompt).await {
        Ok(insight) => insight,
        Err(e) => {
            tracing::warn!(error = %e, "Claude API unavailable, using deterministic fallback");
            generate_fallback_insight(&recent, streak, avg_mood, positive, negative)
        }
    };

    Ok(Json(insight))
}

async fn call_claude(state: &AppState, prompt: &str) -> Result<InsightResponse, anyhow::Error> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let response = client
        .post("https://api.anthropic.com/v1/messages")
        .header("x-api-key", &state.config.claude_api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": state.config.claude_model,
            "max_tokens": 1024,
            "messages": [{
                "role": "user",
                "content": prompt
            }]
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
        .unwrap_or("{}");

    let mut insight: InsightResponse = serde_json::from_str(text)?;
    insight.source = "claude".to_string();
    Ok(insight)
}

fn generate_fallback_insight(
    recent: &[DecodedEntry],
    streak: u32,
    avg_mood: Option<f64>,
    positive: usize,
    negative: usize,
) -> InsightResponse {
    if recent.is_empty() {
        return InsightResponse {
            summary: "You haven't journaled in the last 30 days. A single sentence is enough to start again.".into(),
            observations: vec![],
            suggestions: vec!["Write one line about how today felt.".into()],
            streak_note: "No active streak yet.".into(),
            source: "fallback".into(),
        };
    }

    let summary = match avg_mood {
        Some(m) if m >= 3.0 => format!(
            "You wrote {} entries over the last 30 days and your mood has leaned bright (average {:.1} of 5).",
            recent.len(),
            m
        ),
        Some(m) => format!(
            "You wrote {} entries over the last 30 days. Your average mood of {:.1} of 5 suggests it has been a heavier stretch.",
            recent.len(),
            m
        ),
        None => format!(
            "You wrote {} entries over the last 30 days. Tag a mood on your entries to see trends here.",
            recent.len()
        ),
    };

    let mut observations = Vec::new();
    if positive > negative {
        observations.push(format!(
            "{} of your entries carried a positive tone, against {} negative.",
            positive, negative
        ));
    } else if negative > positive {
        observations.push(format!(
            "{} of your entries carried a negative tone, against {} positive — be kind to yourself.",
            negative, positive
        ));
    }
    let days_written: std::collections::HashSet<_> =
        recent.iter().filter_map(|e| e.date_key).collect();
    observations.push(format!(
        "You journaled on {} distinct days this month.",
        days_written.len()
    ));

    let suggestions = vec![
        "Try writing at the same time each day — right after an existing routine sticks best.".into(),
        "Re-read one entry from a good day this week.".into(),
    ];

    let streak_note = if streak > 7 {
        format!("A {streak}-day streak — journaling has become part of your rhythm.")
    } else if streak > 0 {
        format!("You're on a {streak}-day streak. Keep the chain going.")
    } else {
        "No active streak. Today is a clean slate.".into()
    };

    InsightResponse {
        summary,
        observations,
        suggestions,
        streak_note,
        source: "fallback".into(),
    }
}
