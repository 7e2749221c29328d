use async_trait::async_trait;
use httpmock::prelude::*;
use netliq::report::system_prompt;
use netliq::{
    ChatAnalyst, Language, NetliqError, ReportContext, ReportWriter, SignalRecord,
    generate_report,
};
use serde_json::json;

fn ctx() -> ReportContext {
    ReportContext {
        signals: SignalRecord::no_data(),
        metrics: Default::default(),
        latest_values: None,
    }
}

#[tokio::test]
async fn posts_chat_completion_and_returns_content() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header_exists("authorization");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "# Market Status: GREEN"}}
                ]
            }));
        })
        .await;

    let analyst = ChatAnalyst::with_api_key("k")
        .with_base_url(server.base_url())
        .with_model("test-model");
    let text = analyst.write_report(&ctx(), Language::En).await.unwrap();
    m.assert_async().await;
    assert_eq!(text, "# Market Status: GREEN");
}

#[tokio::test]
async fn missing_key_is_a_configuration_error() {
    let analyst = ChatAnalyst::with_api_key(" ").with_base_url("http://127.0.0.1:9");
    match analyst.write_report(&ctx(), Language::En).await.unwrap_err() {
        NetliqError::Configuration { provider, msg } => {
            assert_eq!(provider, ChatAnalyst::NAME);
            assert!(msg.contains("OPENAI_API_KEY"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_degrades_to_inline_error_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limited");
        })
        .await;

    let analyst = ChatAnalyst::with_api_key("k").with_base_url(server.base_url());
    let text = generate_report(&analyst, &ctx(), Language::Zh).await;
    assert!(text.starts_with("Error generating report: "), "{text}");
    assert!(text.contains("rate limited"));
}

#[tokio::test]
async fn empty_choices_is_a_data_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let analyst = ChatAnalyst::with_api_key("k").with_base_url(server.base_url());
    assert!(matches!(
        analyst.write_report(&ctx(), Language::En).await,
        Err(NetliqError::Data(_))
    ));
}

struct Canned(Result<String, NetliqError>);

#[async_trait]
impl ReportWriter for Canned {
    async fn write_report(
        &self,
        _ctx: &ReportContext,
        _language: Language,
    ) -> Result<String, NetliqError> {
        self.0.clone()
    }
}

#[tokio::test]
async fn generate_report_passes_text_through() {
    let ok = Canned(Ok("report".into()));
    assert_eq!(generate_report(&ok, &ctx(), Language::En).await, "report");

    let err = NetliqError::remote("x", "down");
    let failing = Canned(Err(err.clone()));
    assert_eq!(
        generate_report(&failing, &ctx(), Language::En).await,
        format!("Error generating report: {err}")
    );
}

#[test]
fn system_prompt_names_the_language() {
    assert!(system_prompt(Language::Zh).contains("MUST write your response in Chinese (Simplified)"));
    assert!(system_prompt(Language::En).contains("in English."));
    assert!(!system_prompt(Language::En).contains("{language}"));
}
