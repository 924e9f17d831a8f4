use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use serde_json::Value;
use tokio::net::TcpListener;

use super::serve;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::CompletionPrompt;
use crate::domain::services::GenerationProxy;

struct FakeBackend {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Backend for FakeBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, _prompt: CompletionPrompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => return Ok(text.to_string()),
            Err(message) => bail!("{message}"),
        }
    }
}

fn fake(reply: Result<&str, &str>) -> (BackendBox, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let backend = FakeBackend {
        reply: reply.map(str::to_string).map_err(str::to_string),
        calls: calls.clone(),
    };

    return (Box::new(backend), calls);
}

async fn spawn_server(backend: Option<BackendBox>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let proxy = Arc::new(GenerationProxy::new(backend));
    tokio::spawn(async move {
        return serve(listener, proxy).await;
    });

    return addr;
}

async fn post_raw(addr: SocketAddr, body: &str) -> (u16, Value) {
    let res = reqwest::Client::new()
        .post(format!("http://{addr}/generate"))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap();

    let status = res.status().as_u16();
    let body = res.json::<Value>().await.unwrap();
    return (status, body);
}

#[tokio::test]
async fn it_answers_health_checks() {
    let addr = spawn_server(None).await;
    let res = reqwest::get(format!("http://{addr}/health")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn it_returns_sanitized_code() {
    let (backend, calls) = fake(Ok("```jsx\nexport default function App(){}\n```"));
    let addr = spawn_server(Some(backend)).await;

    let (status, body) = post_raw(addr, &json!({ "prompt": "a red button" }).to_string()).await;

    assert_eq!(status, 200);
    insta::assert_json_snapshot!(body, @r###"
    {
      "code": "export default function App(){}"
    }
    "###);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn it_rejects_invalid_prompts_without_calling_upstream() {
    let (backend, calls) = fake(Ok("<button>Hi</button>"));
    let addr = spawn_server(Some(backend)).await;

    let bodies = [
        json!({ "prompt": "" }).to_string(),
        json!({ "prompt": "   \n\t" }).to_string(),
        json!({ "prompt": null }).to_string(),
        json!({ "prompt": 42 }).to_string(),
        json!({}).to_string(),
        "not json at all".to_string(),
    ];

    for body in bodies {
        let (status, res) = post_raw(addr, &body).await;
        assert_eq!(status, 400, "body: {body}");
        assert!(res.get("details").is_none());
        assert!(res["error"].as_str().unwrap().contains("prompt"));
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_fails_when_not_configured() {
    let addr = spawn_server(None).await;

    let (status, body) = post_raw(addr, &json!({ "prompt": "a card" }).to_string()).await;

    assert_eq!(status, 500);
    insta::assert_json_snapshot!(body, @r###"
    {
      "error": "Server is not configured with an OpenAI API token. Set OPENAI_API_KEY or --openai-token and restart."
    }
    "###);
}

#[tokio::test]
async fn it_prefers_invalid_request_over_not_configured() {
    let addr = spawn_server(None).await;

    let (status, _) = post_raw(addr, &json!({ "prompt": " " }).to_string()).await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn it_reports_upstream_failures_with_details() {
    let (backend, calls) = fake(Err("rate limited"));
    let addr = spawn_server(Some(backend)).await;

    let (status, body) = post_raw(addr, &json!({ "prompt": "a navbar" }).to_string()).await;

    assert_eq!(status, 500);
    insta::assert_json_snapshot!(body, @r###"
    {
      "details": "rate limited",
      "error": "Failed to generate component code."
    }
    "###);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn it_allows_any_origin() {
    let addr = spawn_server(None).await;
    let res = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();

    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .unwrap()
            .to_str()
            .unwrap(),
        "*"
    );
}
