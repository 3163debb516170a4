//! OpenAI to Amazon Q conversion tests
//!
//! Exercises the text-only flattening path: role-annotated transcript
//! building, the single CONTEXT/USER MESSAGE wrapper, and model pass-through.

use qmux::config::{Config, LogLevel};
use qmux::converter::amazonq::AmazonQRequest;
use qmux::converter::openai_to_amazonq::OpenAiRequest;
use qmux::OpenAiToAmazonQConverter;
use serde_json::json;

/// Helper function to create test configuration with fixed values
fn test_config() -> Config {
    Config {
        operating_system: "macos".to_string(),
        working_directory: "/".to_string(),
        origin: "CLI".to_string(),
        log_level: LogLevel::Info,
    }
}

/// Helper function to convert a JSON fixture
fn convert(request: serde_json::Value) -> AmazonQRequest {
    let request: OpenAiRequest =
        serde_json::from_value(request).expect("fixture should deserialize");
    OpenAiToAmazonQConverter::new(&test_config())
        .convert(request)
        .expect("conversion should succeed")
}

/// Test that the conversation flattens into one wrapped transcript
#[test]
fn test_transcript_flattening() {
    let result = convert(json!({
        "model": "claude-sonnet-4",
        "messages": [
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": "Hi"}
        ]
    }));

    let current = &result.conversation_state.current_message.user_input_message;
    assert_eq!(
        current.content,
        "--- CONTEXT ENTRY BEGIN ---\n[]\n--- CONTEXT ENTRY END ---\n\n\
         --- USER MESSAGE BEGIN ---\nuser:\nHello\n\nassistant:\nHi--- USER MESSAGE END ---"
    );
    assert!(result.conversation_state.history.is_empty(), "OpenAI path keeps no history");
    assert_eq!(result.conversation_state.chat_trigger_type, "MANUAL");
}

/// Test that array content keeps text segments and drops everything else
#[test]
fn test_array_content_segments() {
    let result = convert(json!({
        "messages": [
            {"role": "user", "content": [
                {"type": "text", "text": "part one"},
                "part two",
                {"type": "image_url", "image_url": {"url": "https://example.com/x.png"}}
            ]}
        ]
    }));

    let current = &result.conversation_state.current_message.user_input_message;
    assert!(current.content.contains("user:\npart one\npart two"));
    assert!(!current.content.contains("example.com"));
}

/// Test role and content defaults for sparse messages
#[test]
fn test_message_defaults() {
    let result = convert(json!({
        "messages": [
            {"content": "no role given"},
            {"role": "assistant"}
        ]
    }));

    let current = &result.conversation_state.current_message.user_input_message;
    assert!(current.content.contains("user:\nno role given\n\nassistant:\n"));
}

/// Test model pass-through and the default model id
#[test]
fn test_model_pass_through() {
    let named = convert(json!({
        "model": "claude-sonnet-4.5",
        "messages": [{"role": "user", "content": "hi"}]
    }));
    let current = &named.conversation_state.current_message.user_input_message;
    assert_eq!(current.model_id.as_deref(), Some("claude-sonnet-4.5"));

    let unnamed = convert(json!({
        "messages": [{"role": "user", "content": "hi"}]
    }));
    let current = &unnamed.conversation_state.current_message.user_input_message;
    assert_eq!(current.model_id.as_deref(), Some("claude-sonnet-4"));
}

/// Test the serialized wire shape of the OpenAI path
#[test]
fn test_serialized_wire_shape() {
    let result = convert(json!({
        "messages": [{"role": "user", "content": "hi"}]
    }));

    let value = serde_json::to_value(&result).expect("request should serialize");
    let state = &value["conversationState"];
    assert!(state["conversationId"].as_str().unwrap().len() == 36, "Fresh id should be a UUID");
    assert_eq!(state["history"], json!([]));

    let current = &state["currentMessage"]["userInputMessage"];
    assert_eq!(current["origin"], "CLI");
    assert_eq!(
        current["userInputMessageContext"]["tools"],
        json!([]),
        "OpenAI path advertises an empty tools list"
    );
    assert!(current.get("images").is_none());
}
