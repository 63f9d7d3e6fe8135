//! Prompt template for behavior analysis

use crate::error::Result;

/// Prompt template for scoring a window of user events
///
/// The oracle is instructed to answer with a single JSON object so the
/// response can be parsed without free-text recovery.
pub const BEHAVIOR_ANALYSIS_PROMPT: &str = r#"SYSTEM: You are a Senior Fraud Analyst. Detect bot-like behavior.

INPUT METADATA:
timestamp, event_type, ip_address, user_agent, payload

EVENTS ({event_count} in window):
{events}

CRITERIA:
- High frequency (bot usage)
- Illogical sequence (buy before login, or buy immediately after login)
- Suspicious User-Agents

OUTPUT FORMAT (JSON ONLY):
{
    "score": <float 0.0-1.0>,
    "reason": "<string>"
}
"#;

/// Build the analysis prompt for a batch of events
pub fn build_analysis_prompt(events: &[serde_json::Value]) -> Result<String> {
    let rendered = serde_json::to_string_pretty(events)?;

    Ok(BEHAVIOR_ANALYSIS_PROMPT
        .replace("{event_count}", &events.len().to_string())
        .replace("{events}", &rendered))
}
