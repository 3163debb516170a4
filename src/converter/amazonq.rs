//!
//! Amazon Q conversation wire types.
//!
//! Target schema for converted requests: a conversation state holding an ordered
//! history of alternating user/assistant turns plus a single current message.
//! Shared by both converter directions. Field names serialize in the camelCase
//! form the backend expects; optional fields are omitted entirely when absent.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::Serialize;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Top-level Amazon Q request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonQRequest {
    /** complete conversation state for this request */
    pub conversation_state: ConversationState,
}

///
/// Conversation state: identifier, turn history, and the current message.
///
/// The backend requires strict user/assistant alternation within `history`;
/// the converters enforce that invariant before building this structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    /** unique conversation identifier, fresh per request unless continued */
    pub conversation_id: String,
    /** prior turns, oldest first, strictly alternating */
    pub history: Vec<HistoryEntry>,
    /** the message being submitted now */
    pub current_message: CurrentMessage,
    /** fixed trigger metadata, always "MANUAL" */
    pub chat_trigger_type: String,
}

///
/// Wrapper around the current user input message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMessage {
    /** the user turn being submitted */
    pub user_input_message: UserInputMessage,
}

///
/// One history turn, tagged by speaker.
///
/// Serializes externally tagged, producing `{"userInputMessage": {...}}` or
/// `{"assistantResponseMessage": {...}}` objects as the backend expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HistoryEntry {
    /** a user turn */
    #[serde(rename = "userInputMessage")]
    User(UserInputMessage),
    /** an assistant turn */
    #[serde(rename = "assistantResponseMessage")]
    Assistant(AssistantResponseMessage),
}

///
/// A user turn: prompt content plus its environment/tool context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputMessage {
    /** flattened prompt text, possibly delimiter-wrapped for the current message */
    pub content: String,
    /** environment descriptor, tool results and tool definitions */
    pub user_input_message_context: UserInputMessageContext,
    /** request origin marker, "CLI" by default */
    pub origin: String,
    /** attached images, omitted when none */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageBlock>>,
    /** canonical model identifier, only set on the current message */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

///
/// Per-turn context attached to a user input message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputMessageContext {
    /** environment the request originates from */
    pub env_state: EnvState,
    /** results answering earlier tool uses, omitted when none */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_results: Option<Vec<ToolResult>>,
    /** tool definitions available to the model, omitted when none */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

///
/// Environment descriptor carried in every user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvState {
    /** operating system name, e.g. "macos" or "linux" */
    pub operating_system: String,
    /** working directory of the originating process */
    pub current_working_directory: String,
}

///
/// Normalized result of one tool invocation.
///
/// Invariant: `content` is never empty; an all-whitespace result collapses to
/// a single cancellation sentinel entry during normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /** identifier of the tool use this result answers */
    pub tool_use_id: String,
    /** ordered text fragments of the result */
    pub content: Vec<ToolResultContentEntry>,
    /** "success" or "error" */
    pub status: String,
}

///
/// One text fragment inside a tool result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResultContentEntry {
    /** fragment text */
    pub text: String,
}

///
/// Base64 image attached to a user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBlock {
    /** short format token derived from the media type, e.g. "png" */
    pub format: String,
    /** raw image payload */
    pub source: ImageSourceBytes,
}

///
/// Image payload carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSourceBytes {
    /** base64-encoded image data, passed through unchanged */
    pub bytes: String,
}

///
/// Tool definition wrapper in Amazon Q format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /** the wrapped specification */
    pub tool_specification: ToolSpecification,
}

///
/// Specification of a single tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpecification {
    /** tool name */
    pub name: String,
    /** tool description, truncated when oversized */
    pub description: String,
    /** JSON schema of the tool input */
    pub input_schema: InputSchema,
}

///
/// Input schema carrier for a tool specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    /** the schema as raw JSON */
    pub json: serde_json::Value,
}

///
/// An assistant turn: response text plus any tool invocations it issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponseMessage {
    /** generated message identifier */
    pub message_id: String,
    /** flattened response text */
    pub content: String,
    /** deduplicated tool invocations, omitted when none */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_uses: Option<Vec<ToolUseEntry>>,
}

///
/// One tool invocation recorded on an assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseEntry {
    /** unique tool use identifier */
    pub tool_use_id: String,
    /** tool name */
    pub name: String,
    /** invocation arguments */
    pub input: serde_json::Value,
}
