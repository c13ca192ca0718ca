//! Gemini adapter behaviour against a local fake `generateContent` server.
//!
//! The fake runs on a real socket so reqwest's request encoding, headers,
//! timeouts and status handling are exercised end to end.

use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;
use rstest::rstest;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use backend::domain::{SkillDescription, SkillSuggestions};
use backend::domain::ports::{SkillSuggestionSource, SkillSuggestionSourceError};
use backend::outbound::gemini::{GeminiHttpSource, GeminiSourceConfig};

const API_KEY: &str = "test-key";
const MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    api_key: Option<String>,
    body: Value,
}

struct FakeGemini {
    status: StatusCode,
    body: String,
    delay: Duration,
    captured: Mutex<Vec<Captured>>,
}

async fn generate_content(
    request: HttpRequest,
    body: web::Bytes,
    fake: web::Data<FakeGemini>,
) -> HttpResponse {
    let captured = Captured {
        path: request.path().to_owned(),
        api_key: request
            .headers()
            .get("x-goog-api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    fake.captured.lock().expect("capture lock").push(captured);
    if !fake.delay.is_zero() {
        tokio::time::sleep(fake.delay).await;
    }
    HttpResponse::build(fake.status)
        .content_type("application/json")
        .body(fake.body.clone())
}

struct Harness {
    fake: web::Data<FakeGemini>,
    handle: ServerHandle,
    source: GeminiHttpSource,
}

impl Harness {
    fn start(status: StatusCode, body: String, delay: Duration, timeout: Duration) -> Self {
        let fake = web::Data::new(FakeGemini {
            status,
            body,
            delay,
            captured: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake server");
        let addr = listener.local_addr().expect("local addr");
        let app_fake = fake.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_fake.clone())
                .default_service(web::to(generate_content))
        })
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let source = GeminiHttpSource::new(GeminiSourceConfig {
            base_url: Url::parse(&format!("http://{addr}/")).expect("fake base url"),
            model: MODEL.to_owned(),
            api_key: Zeroizing::new(API_KEY.to_owned()),
            timeout,
        })
        .expect("adapter builds");

        Self {
            fake,
            handle,
            source,
        }
    }

    fn responding(status: StatusCode, body: Value) -> Self {
        Self::start(status, body.to_string(), Duration::ZERO, Duration::from_secs(5))
    }

    fn captured(&self) -> Vec<Captured> {
        self.fake.captured.lock().expect("capture lock").clone()
    }

    async fn generate(&self) -> Result<SkillSuggestions, SkillSuggestionSourceError> {
        let description =
            SkillDescription::new("I teach beginner guitar").expect("long enough description");
        self.source.generate(&description).await
    }

    async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[rstest]
#[actix_web::test]
async fn posts_prompt_and_decodes_suggestions() {
    let output = json!({
        "suggestedSkills": ["Music Theory", "Songwriting"],
        "skillMatches": { "Music Theory": ["Guitar"], "Songwriting": [] }
    });
    let harness = Harness::responding(StatusCode::OK, candidate(&output.to_string()));

    let suggestions = harness.generate().await.expect("suggestions");

    assert_eq!(suggestions.suggested_skills, ["Music Theory", "Songwriting"]);
    assert_eq!(suggestions.skill_matches["Music Theory"], ["Guitar"]);

    let captured = harness.captured();
    assert_eq!(captured.len(), 1);
    let request = &captured[0];
    assert_eq!(
        request.path,
        format!("/v1beta/models/{MODEL}:generateContent")
    );
    assert_eq!(request.api_key.as_deref(), Some(API_KEY));
    let prompt = request.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("Skill Description: I teach beginner guitar"));
    assert_eq!(
        request.body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    harness.stop().await;
}

#[rstest]
#[actix_web::test]
async fn strips_markdown_fences_from_model_output() {
    let fenced = "```json\n{\"suggestedSkills\":[\"Baking\"],\"skillMatches\":{}}\n```";
    let harness = Harness::responding(StatusCode::OK, candidate(fenced));

    let suggestions = harness.generate().await.expect("suggestions");

    assert_eq!(suggestions.suggested_skills, ["Baking"]);
    harness.stop().await;
}

#[rstest]
#[case::rate_limited(StatusCode::TOO_MANY_REQUESTS)]
#[case::bad_key(StatusCode::FORBIDDEN)]
#[case::outage(StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn maps_error_statuses(#[case] status: StatusCode) {
    let harness = Harness::responding(status, json!({ "error": { "message": "nope" } }));

    let error = harness.generate().await.expect_err("error status");

    let expected = match status {
        StatusCode::TOO_MANY_REQUESTS => {
            matches!(error, SkillSuggestionSourceError::RateLimited { .. })
        }
        StatusCode::FORBIDDEN => {
            matches!(error, SkillSuggestionSourceError::InvalidRequest { .. })
        }
        _ => matches!(error, SkillSuggestionSourceError::Transport { .. }),
    };
    assert!(expected, "unexpected mapping for {status}: {error:?}");
    assert!(error.to_string().contains("nope"));
    harness.stop().await;
}

#[rstest]
#[actix_web::test]
async fn missing_candidates_are_empty() {
    let harness = Harness::responding(StatusCode::OK, json!({ "candidates": [] }));

    let error = harness.generate().await.expect_err("no candidates");

    assert_eq!(error, SkillSuggestionSourceError::Empty);
    harness.stop().await;
}

#[rstest]
#[actix_web::test]
async fn output_without_required_keys_is_a_decode_error() {
    let harness = Harness::responding(StatusCode::OK, candidate("{\"skills\":[\"Baking\"]}"));

    let error = harness.generate().await.expect_err("missing keys");

    assert!(matches!(error, SkillSuggestionSourceError::Decode { .. }));
    harness.stop().await;
}

#[rstest]
#[actix_web::test]
async fn slow_responses_time_out() {
    let harness = Harness::start(
        StatusCode::OK,
        candidate("{}").to_string(),
        Duration::from_secs(3),
        Duration::from_millis(200),
    );

    let error = harness.generate().await.expect_err("timeout");

    assert!(matches!(error, SkillSuggestionSourceError::Timeout { .. }));
    harness.stop().await;
}
