use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zai_mcp::{ConfigOverrides, ServerConfig, ToolDispatcher};

async fn dispatcher_for(server: &MockServer) -> ToolDispatcher {
    let config = ServerConfig::load(
        None,
        ConfigOverrides {
            api_key: Some("sk-test".to_string()),
            base_url: Some(format!("{}/api/paas/v4", server.uri())),
            model: Some("glm-test".to_string()),
            max_tokens: Some(512),
            temperature: Some(0.2),
        },
    )
    .unwrap();
    ToolDispatcher::new(&config).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "cmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    })
}

#[tokio::test]
async fn list_tools_has_one_descriptor_per_tool() {
    let server = MockServer::start().await;
    let dispatcher = dispatcher_for(&server).await;

    for (name, required) in [
        ("zai_chat", "message"),
        ("zai_search", "query"),
        ("zai_summarize", "text"),
    ] {
        let matching: Vec<_> = dispatcher
            .list_tools()
            .iter()
            .filter(|t| t.name == name)
            .collect();
        assert_eq!(matching.len(), 1, "{}", name);
        assert_eq!(matching[0].input_schema["required"], json!([required]));
    }
}

#[tokio::test]
async fn chat_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "model": "glm-test",
            "max_tokens": 512,
            "temperature": 0.2,
            "messages": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": "hi there"}}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .await
        .call_tool("zai_chat", json!({"message": "hello"}))
        .await;

    assert!(!result.is_error);
    assert_eq!(result.content.len(), 1);
    assert_eq!(result.text_content(), "hi there");
}

#[tokio::test]
async fn chat_without_content_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .await
        .call_tool("zai_chat", json!({"message": "hello"}))
        .await;

    assert!(!result.is_error);
    assert_eq!(result.text_content(), "No response from z.ai");
}

#[tokio::test]
async fn upstream_500_becomes_error_result_for_every_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(3)
        .mount(&server)
        .await;
    let dispatcher = dispatcher_for(&server).await;

    for (name, args) in [
        ("zai_chat", json!({"message": "hello"})),
        ("zai_search", json!({"query": "x"})),
        ("zai_summarize", json!({"text": "some text"})),
    ] {
        let result = dispatcher.call_tool(name, args).await;
        assert!(result.is_error, "{}", name);
        let text = result.text_content();
        assert!(text.contains(name), "{}", text);
        assert!(text.contains("server error"), "{}", text);
        assert!(text.starts_with(&format!("Error executing {}: ", name)));
    }
}

#[tokio::test]
async fn unreachable_upstream_becomes_error_result() {
    let uri = {
        let server = MockServer::builder().start().await;
        server.uri()
    };
    let config = ServerConfig::load(
        None,
        ConfigOverrides {
            api_key: Some("sk-test".to_string()),
            base_url: Some(uri),
            ..Default::default()
        },
    )
    .unwrap();
    let dispatcher = ToolDispatcher::new(&config).unwrap();

    let result = dispatcher.call_tool("zai_chat", json!({"message": "hello"})).await;
    assert!(result.is_error);
    assert!(result
        .text_content()
        .starts_with("Error executing zai_chat: request to z.ai failed"));
}

#[tokio::test]
async fn search_with_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/search"))
        .and(body_partial_json(json!({"query": "x", "limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .await
        .call_tool("zai_search", json!({"query": "x"}))
        .await;

    assert!(!result.is_error);
    assert_eq!(result.text_content(), "No results found for \"x\".");
}

#[tokio::test]
async fn search_lists_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/search"))
        .and(body_partial_json(json!({"limit": 2, "filters": {"lang": "en"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Tokio", "url": "https://tokio.rs", "snippet": "Async runtime"},
                {"title": "Serde", "url": "https://serde.rs"}
            ]
        })))
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .await
        .call_tool(
            "zai_search",
            json!({"query": "rust crates", "limit": 2, "filters": {"lang": "en"}}),
        )
        .await;

    assert!(!result.is_error);
    let text = result.text_content();
    assert!(text.starts_with("Found 2 results for \"rust crates\":"));
    assert!(text.contains("1. Tokio\n   https://tokio.rs\n   Async runtime"));
    assert!(text.contains("2. Serde\n   https://serde.rs"));
}

#[tokio::test]
async fn summarize_uses_chat_endpoint_with_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                {
                    "role": "system",
                    "content": "You are a helpful assistant that creates clear, accurate summaries. Create a long summary in key points format."
                },
                {"role": "user", "content": "The quick brown fox."}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("- A fox.")))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .await
        .call_tool(
            "zai_summarize",
            json!({"text": "The quick brown fox.", "length": "long", "style": "key_points"}),
        )
        .await;

    assert!(!result.is_error);
    assert_eq!(result.content.len(), 1);
    assert_eq!(result.text_content(), "- A fox.");
}

#[tokio::test]
async fn summarize_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("A summary.")))
        .expect(2)
        .mount(&server)
        .await;
    let dispatcher = dispatcher_for(&server).await;
    let args = json!({"text": "Some long text", "length": "short"});

    let first = dispatcher.call_tool("zai_summarize", args.clone()).await;
    let second = dispatcher.call_tool("zai_summarize", args).await;

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn unknown_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .await
        .call_tool("zai_unknown", json!({"message": "hello"}))
        .await;

    assert!(result.is_error);
    assert_eq!(result.text_content(), "Unknown tool: zai_unknown");
}

#[tokio::test]
async fn missing_required_argument_is_error_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dispatcher = dispatcher_for(&server).await;

    let result = dispatcher.call_tool("zai_search", json!({"limit": 3})).await;
    assert!(result.is_error);
    let text = result.text_content();
    assert!(text.starts_with("Error executing zai_search: invalid arguments:"));
    assert!(text.contains("query"));

    let bad_enum = dispatcher
        .call_tool("zai_summarize", json!({"text": "t", "length": "huge"}))
        .await;
    assert!(bad_enum.is_error);
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/chat/completions"))
        .and(body_partial_json(json!({"messages": [{"role": "user", "content": "one"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("first")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v4/chat/completions"))
        .and(body_partial_json(json!({"messages": [{"role": "user", "content": "two"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("second")))
        .mount(&server)
        .await;
    let dispatcher = dispatcher_for(&server).await;

    let (a, b) = tokio::join!(
        dispatcher.call_tool("zai_chat", json!({"message": "one"})),
        dispatcher.call_tool("zai_chat", json!({"message": "two"})),
    );

    assert_eq!(a.text_content(), "first");
    assert_eq!(b.text_content(), "second");
}
