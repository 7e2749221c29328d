use async_trait::async_trait;
use netliq_core::{Language, NetliqError, ReportContext};
use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-exp:free";
/// Sampling temperature used for reports.
pub const TEMPERATURE: f32 = 0.3;

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
const MODEL_ENV: &str = "LLM_MODEL";

const SYSTEM_PROMPT: &str = r"You are a Senior Macro Strategist at a top-tier hedge fund.
Your job is to analyze the Net Liquidity environment and provide a clear, actionable market assessment.

Key Definitions:
- Net Liquidity = Fed Assets (WALCL) - Reverse Repo (RRP) - TGA.
- Rising Net Liquidity -> Bullish (Risk-On).
- Falling Net Liquidity -> Bearish (Risk-Off).
- VIX < 20 & MOVE > 120 -> DANGER SIGNAL (Bond volatility warning).

Your output MUST be valid Markdown.
IMPORTANT: You MUST write your response in {language}.

Structure:
# Market Status: [GREEN / YELLOW / RED]

## Executive Summary
[1-2 sentences on the current regime]

## Liquidity Analysis
- **Fed Balance Sheet**: [Analysis]
- **TGA/RRP Flows**: [Analysis]
- **Net Liquidity Trend**: [Analysis]

## Risk Signals
- **Volatility (VIX/MOVE)**: [Analysis]
- **Cross-Asset (DXY/Gold/BTC)**: [Analysis]

## Investment Playbook
- **Equities**: [Overweight/Neutral/Underweight]
- **Bonds**: [Duration bias]
- **Crypto**: [Risk stance]
";

/// Writes a natural-language report from an assessment context.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Produce a Markdown report in `language`.
    async fn write_report(
        &self,
        ctx: &ReportContext,
        language: Language,
    ) -> Result<String, NetliqError>;
}

/// Generate a report, folding any failure into the returned text.
///
/// Never fails: errors come back as `Error generating report: <error>`.
pub async fn generate_report(
    writer: &dyn ReportWriter,
    ctx: &ReportContext,
    language: Language,
) -> String {
    match writer.write_report(ctx, language).await {
        Ok(text) => text,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, "report generation failed");
            format!("Error generating report: {e}")
        }
    }
}

/// The system prompt for `language`.
#[must_use]
pub fn system_prompt(language: Language) -> String {
    SYSTEM_PROMPT.replace("{language}", language.display_name())
}

fn user_prompt(ctx: &ReportContext) -> Result<String, NetliqError> {
    let json = serde_json::to_string_pretty(ctx)
        .map_err(|e| NetliqError::Data(format!("serialize report context: {e}")))?;
    Ok(format!(
        "Here is the current market data:\n```json\n{json}\n```\n\nProvide your strategic assessment."
    ))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Report writer backed by an OpenAI-compatible chat-completions API.
pub struct ChatAnalyst {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl Default for ChatAnalyst {
    fn default() -> Self {
        Self::new_default()
    }
}

impl ChatAnalyst {
    /// Stable name used in error tags.
    pub const NAME: &'static str = "netliq-analyst";

    /// Build from `OPENAI_API_KEY`, `OPENAI_BASE_URL`, and `LLM_MODEL`.
    ///
    /// A missing key is reported as a configuration error when a report is
    /// requested.
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            model: std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }

    /// Build with an explicit API key and default endpoint and model.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: Some(api_key.into()).filter(|k| !k.trim().is_empty()),
            model: DEFAULT_MODEL.into(),
        }
    }

    /// Point the writer at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a different model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a provided `reqwest::Client`.
    #[must_use]
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReportWriter for ChatAnalyst {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "netliq::report::write_report",
            skip_all,
            fields(model = %self.model, language = language.code()),
        )
    )]
    async fn write_report(
        &self,
        ctx: &ReportContext,
        language: Language,
    ) -> Result<String, NetliqError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NetliqError::configuration(Self::NAME, format!("{API_KEY_ENV} not set")))?;
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt(language),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(ctx)?,
                },
            ],
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NetliqError::remote(Self::NAME, e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| NetliqError::remote(Self::NAME, e.to_string()))?;
        if !status.is_success() {
            return Err(NetliqError::remote(Self::NAME, format!("{status}: {text}")));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| NetliqError::Data(format!("malformed chat response: {e}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NetliqError::Data("chat response has no content".into()))
    }
}
