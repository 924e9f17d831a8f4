use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::fenced_completion_fixture;

use super::GenerationProxy;
use super::SYSTEM_INSTRUCTION;
use crate::domain::models::Backend;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::GenerationError;

struct ScriptedBackend {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<CompletionPrompt>>>,
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt);

        match &self.reply {
            Ok(text) => return Ok(text.to_string()),
            Err(err) => bail!(err.to_string()),
        }
    }
}

fn proxy_with(reply: Result<&str, &str>) -> (GenerationProxy, Arc<AtomicUsize>, Arc<Mutex<Vec<CompletionPrompt>>>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let prompts = Arc::new(Mutex::new(vec![]));
    let backend = ScriptedBackend {
        reply: reply.map(|e| return e.to_string()).map_err(|e| return e.to_string()),
        calls: calls.clone(),
        prompts: prompts.clone(),
    };

    return (GenerationProxy::new(Some(Box::new(backend))), calls, prompts);
}

#[tokio::test]
async fn it_rejects_empty_prompts_without_calling_upstream() {
    let (proxy, calls, _) = proxy_with(Ok("<div></div>"));

    assert_eq!(proxy.generate(Some("")).await, Err(GenerationError::InvalidRequest));
    assert_eq!(proxy.generate(Some("  \n\t")).await, Err(GenerationError::InvalidRequest));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_rejects_missing_prompts_without_calling_upstream() {
    let (proxy, calls, _) = proxy_with(Ok("<div></div>"));

    assert_eq!(proxy.generate(None).await, Err(GenerationError::InvalidRequest));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_validates_before_checking_configuration() {
    let proxy = GenerationProxy::new(None);

    assert!(!proxy.is_configured());
    assert_eq!(proxy.generate(None).await, Err(GenerationError::InvalidRequest));
    assert_eq!(
        proxy.generate(Some("a red button")).await,
        Err(GenerationError::NotConfigured)
    );
    assert!(proxy.health_check().await.is_err());
}

#[tokio::test]
async fn it_sends_the_system_instruction_and_prompt() -> Result<()> {
    let (proxy, calls, prompts) = proxy_with(Ok("<button style=\"color:red\">Click</button>"));

    let code = proxy.generate(Some("a red button")).await?;

    assert_eq!(code, "<button style=\"color:red\">Click</button>");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts[0].system, SYSTEM_INSTRUCTION);
    assert_eq!(prompts[0].text, "a red button");
    assert_eq!(prompts[0].sampling.temperature, 0.3);
    assert_eq!(prompts[0].sampling.max_tokens, 2048);

    return Ok(());
}

#[tokio::test]
async fn it_sanitizes_fenced_completions() -> Result<()> {
    let (proxy, _, _) = proxy_with(Ok(fenced_completion_fixture()));

    let code = proxy.generate(Some("an empty app")).await?;
    assert_eq!(code, "export default function App(){}");

    return Ok(());
}

#[tokio::test]
async fn it_reports_upstream_failures_with_details() {
    let (proxy, calls, _) = proxy_with(Err("OpenAI returned status 429: Rate limit reached"));

    let res = proxy.generate(Some("a red button")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        res,
        Err(GenerationError::UpstreamFailure {
            details: "OpenAI returned status 429: Rate limit reached".to_string()
        })
    );
}

#[tokio::test]
async fn it_treats_empty_completions_as_upstream_failures() {
    let (proxy, _, _) = proxy_with(Ok("```html\n```"));

    let res = proxy.generate(Some("a red button")).await;
    assert!(matches!(res, Err(GenerationError::UpstreamFailure { .. })));
}

#[test]
fn it_forbids_prose_and_fences_in_the_system_instruction() {
    assert!(SYSTEM_INSTRUCTION.contains("ONLY the raw code"));
    assert!(SYSTEM_INSTRUCTION.contains("markdown fences"));
    assert!(SYSTEM_INSTRUCTION.contains("imports"));
}
