use serde_json::json;

/// A completion the way models usually answer despite being told not to:
/// wrapped in a tagged markdown fence.
pub fn fenced_completion_fixture() -> &'static str {
    return "```jsx\nexport default function App(){}\n```";
}

/// Body of a non-streaming OpenAI chat completion with a single choice.
pub fn openai_completion_body(content: &str) -> String {
    return json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4.1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content,
            },
            "finish_reason": "stop",
        }],
    })
    .to_string();
}
