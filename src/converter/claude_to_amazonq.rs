//!
//! Claude to Amazon Q format converter for API request translation.
//!
//! Converts Anthropic/Claude-style chat completion requests to the Amazon Q
//! conversation format. Rebuilds a strictly alternating turn history from a
//! message list that may contain consecutive same-role messages, multi-block
//! content, and interleaved tool-use/tool-result pairs, then synthesizes the
//! delimiter-wrapped current message.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::collections::HashSet;

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::{Config, LogLevel};
use crate::converter::amazonq::{
    AmazonQRequest, AssistantResponseMessage, ConversationState, CurrentMessage, EnvState,
    HistoryEntry, ImageBlock, ImageSourceBytes, InputSchema, Tool, ToolResult,
    ToolResultContentEntry, ToolSpecification, ToolUseEntry, UserInputMessage,
    UserInputMessageContext,
};
use crate::error::Result;

/* --- helper functions ----------------------------------------------------------------------- */

///
/// Default input value for tool uses and tool schemas that omit one.
///
/// The backend expects an object, so the fallback is `{}` rather than null.
fn default_tool_input() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

///
/// Human-readable timestamp for the CONTEXT ENTRY section.
///
/// Weekday and instant are derived from the same UTC moment, formatted as
/// `"<Weekday>, <ISO-8601 with milliseconds>"`.
fn current_timestamp() -> String {
    let now = Utc::now();
    format!("{}, {}", now.format("%A"), now.to_rfc3339_opts(SecondsFormat::Millis, true))
}

///
/// Map a client-supplied model name to the canonical backend model identifier.
///
/// Case-insensitive prefix match; unrecognized names silently fall back to the
/// base Sonnet 4 identifier rather than raising an error.
///
/// # Arguments
///  * `model` - client-supplied model name
///
/// # Returns
///  * Canonical backend model identifier
pub fn map_model_name(model: &str) -> String {
    let lower = model.to_lowercase();
    if lower.starts_with("claude-sonnet-4.5") || lower.starts_with("claude-sonnet-4-5") {
        MODEL_ID_SONNET_4_5.to_string()
    } else {
        MODEL_ID_SONNET_4.to_string()
    }
}

/* --- types ----------------------------------------------------------------------------------- */

///
/// Claude chat completion request structure.
///
/// Represents an incoming request in Anthropic's messages API format.
/// Contains the conversation, an optional system prompt, and tool definitions.
#[derive(Debug, Deserialize)]
pub struct ClaudeRequest {
    /** the model identifier to translate */
    #[serde(default)]
    pub model: String,
    /** conversation messages array, oldest first */
    pub messages: Vec<ClaudeMessage>,
    /** optional system prompt, plain string or text block list */
    #[serde(default)]
    pub system: Option<SystemPrompt>,
    /** available tool definitions */
    #[serde(default)]
    pub tools: Option<Vec<ClaudeTool>>,
}

///
/// Claude message within a chat completion request.
#[derive(Debug, Deserialize)]
pub struct ClaudeMessage {
    /** message role: user or assistant; anything else is skipped */
    pub role: String,
    /** message content, plain string or ordered block list */
    pub content: ClaudeContent,
}

///
/// Claude content union type for flexible message content.
///
/// Supports both simple string content and structured content blocks.
/// Block order within a message is significant.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClaudeContent {
    /** simple string content */
    Text(String),
    /** structured content blocks array */
    Blocks(Vec<ClaudeContentBlock>),
}

///
/// Claude structured content block.
///
/// Closed set of block kinds discriminated on the `type` tag; blocks of any
/// other kind deserialize to [`ClaudeContentBlock::Unknown`] and are dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClaudeContentBlock {
    /** text fragment */
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    /** inline image */
    #[serde(rename = "image")]
    Image {
        #[serde(default)]
        source: ImageSourceDescriptor,
    },
    /** assistant-issued tool invocation */
    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default = "default_tool_input")]
        input: serde_json::Value,
    },
    /** user-supplied outcome of a prior tool invocation */
    #[serde(rename = "tool_result")]
    ToolResult {
        #[serde(default)]
        tool_use_id: String,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        content: ToolResultContent,
    },
    /** any unrecognized block kind */
    #[serde(other)]
    Unknown,
}

///
/// Image source descriptor on an image block.
#[derive(Debug, Default, Deserialize)]
pub struct ImageSourceDescriptor {
    /** encoding kind, only "base64" sources are carried through */
    #[serde(rename = "type", default)]
    pub source_type: String,
    /** media type, e.g. "image/png" */
    #[serde(default)]
    pub media_type: Option<String>,
    /** raw base64 data */
    #[serde(default)]
    pub data: Option<String>,
}

///
/// Nested content of a tool result block.
///
/// May be a plain string, a list of text-bearing items, or (when the client
/// sends something else entirely) an arbitrary value yielding no entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ToolResultContent {
    /** single string result */
    Text(String),
    /** ordered item list */
    Items(Vec<ToolResultItem>),
    /** structurally unusable content, normalizes to the cancellation sentinel */
    Other(serde_json::Value),
}

impl Default for ToolResultContent {
    fn default() -> Self {
        ToolResultContent::Items(Vec::new())
    }
}

///
/// One item inside a tool result content list.
///
/// Items are objects carrying a `text` field (tagged `type: "text"` or not),
/// plain strings, or anything else (silently dropped).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ToolResultItem {
    /** object with a text field */
    Entry { text: String },
    /** bare string item */
    Plain(String),
    /** anything else, dropped during normalization */
    Other(serde_json::Value),
}

///
/// System prompt union type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SystemPrompt {
    /** plain string system prompt */
    Text(String),
    /** block list system prompt, flattened to its text blocks */
    Blocks(Vec<SystemBlock>),
}

///
/// One block of an array-form system prompt.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum SystemBlock {
    /** text fragment */
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    /** any unrecognized block kind */
    #[serde(other)]
    Unknown,
}

///
/// Claude tool definition.
#[derive(Debug, Deserialize)]
pub struct ClaudeTool {
    /** tool name */
    pub name: String,
    /** tool description, may be very long */
    #[serde(default)]
    pub description: String,
    /** JSON schema of the tool input */
    #[serde(default = "default_tool_input")]
    pub input_schema: serde_json::Value,
}

///
/// Full description of a tool whose specification carries only a truncated one.
///
/// Queued during tool conversion and re-injected as a TOOL DOCUMENTATION
/// section in the current message so no information is silently lost.
#[derive(Debug, Clone)]
pub struct TruncatedToolDoc {
    /** tool name */
    pub name: String,
    /** the complete, untruncated description */
    pub full_description: String,
}

///
/// Converter from Claude format to Amazon Q format.
///
/// Follows Single Responsibility Principle - handles only format conversion
/// from Anthropic messages to the Amazon Q conversation state.
pub struct ClaudeToAmazonQConverter {
    /** environment descriptor stamped on every user turn */
    env_state: EnvState,
    /** origin marker stamped on every user turn */
    origin: String,
    /** logging level for debug output */
    log_level: LogLevel,
}

/* --- constants ------------------------------------------------------------------------------ */

/** Tool description length above which the specification carries a truncated copy */
const TOOL_DESCRIPTION_LIMIT: usize = 10240;

/** Number of characters kept when a tool description is truncated */
const TOOL_DESCRIPTION_KEEP: usize = 10100;

/** Notice appended to truncated tool descriptions */
const TRUNCATION_NOTICE: &str = "\n\n...(Full description provided in TOOL DOCUMENTATION section)";

/** Sentinel substituted for tool results carrying no usable text */
const CANCELLED_TOOL_RESULT: &str = "Tool use was cancelled by the user";

/** Fixed chat trigger type expected by the backend */
const CHAT_TRIGGER_MANUAL: &str = "MANUAL";

/** Canonical backend identifier for Sonnet 4.5 models */
const MODEL_ID_SONNET_4_5: &str = "claude-sonnet-4.5";

/** Canonical backend identifier for everything else */
const MODEL_ID_SONNET_4: &str = "claude-sonnet-4";

/** Media type assumed when an image block omits one */
const DEFAULT_MEDIA_TYPE: &str = "image/png";

/** Default tool result status when the block omits one */
const STATUS_SUCCESS: &str = "success";

/* --- start of code -------------------------------------------------------------------------- */

impl ClaudeToAmazonQConverter {
    ///
    /// Create a new Claude to Amazon Q converter.
    ///
    /// # Arguments
    ///  * `config` - application configuration supplying the environment
    ///    descriptor, origin marker and logging level
    ///
    /// # Returns
    ///  * New converter instance
    pub fn new(config: &Config) -> Self {
        Self {
            env_state: config.env_state(),
            origin: config.origin.clone(),
            log_level: config.log_level,
        }
    }

    ///
    /// Convert a Claude request to an Amazon Q request.
    ///
    /// All messages except the last become the turn history; the last message
    /// becomes the current message with its delimiter-wrapped prompt. Tool
    /// definitions are request-scoped and attach to the current message only.
    ///
    /// # Arguments
    ///  * `request` - Claude format request to convert
    ///  * `conversation_id` - identifier of the conversation being continued,
    ///    or None to start a fresh one
    ///
    /// # Returns
    ///  * Converted Amazon Q format request
    pub fn convert(
        &self,
        request: ClaudeRequest,
        conversation_id: Option<String>,
    ) -> Result<AmazonQRequest> {
        self.debug(&format!(
            "Converting {} message(s) from Claude to Amazon Q format",
            request.messages.len()
        ));

        let ClaudeRequest { model, mut messages, system, tools } = request;

        let conversation_id = conversation_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let (aq_tools, truncated_docs) = self.convert_tools(tools.unwrap_or_default());

        let last_message = messages.pop();

        let mut seen_tool_use_ids = HashSet::new();
        let raw_turns = self.build_history(&messages, &mut seen_tool_use_ids);
        let history = self.merge_consecutive_user_turns(raw_turns);

        let current =
            self.compose_current_message(last_message, aq_tools, &truncated_docs, system, &model);

        self.debug(&format!("Converted Amazon Q request with {} history turn(s)", history.len()));

        Ok(AmazonQRequest {
            conversation_state: ConversationState {
                conversation_id,
                history,
                current_message: CurrentMessage { user_input_message: current },
                chat_trigger_type: CHAT_TRIGGER_MANUAL.to_string(),
            },
        })
    }

    ///
    /// Convert tool definitions to Amazon Q tool specifications.
    ///
    /// Oversized descriptions are truncated in the specification; their full
    /// text is queued separately for re-injection into the current message.
    ///
    /// # Arguments
    ///  * `tools` - Claude tool definitions
    ///
    /// # Returns
    ///  * Converted specifications and the queued full descriptions
    fn convert_tools(&self, tools: Vec<ClaudeTool>) -> (Vec<Tool>, Vec<TruncatedToolDoc>) {
        let mut aq_tools = Vec::with_capacity(tools.len());
        let mut truncated_docs = Vec::new();

        for tool in tools {
            if tool.description.chars().count() > TOOL_DESCRIPTION_LIMIT {
                self.debug(&format!("Truncating oversized description of tool '{}'", tool.name));
                truncated_docs.push(TruncatedToolDoc {
                    name: tool.name.clone(),
                    full_description: tool.description.clone(),
                });
            }
            aq_tools.push(self.convert_tool(tool));
        }

        (aq_tools, truncated_docs)
    }

    ///
    /// Convert a single tool definition, truncating oversized descriptions.
    fn convert_tool(&self, tool: ClaudeTool) -> Tool {
        let mut description = tool.description;
        if description.chars().count() > TOOL_DESCRIPTION_LIMIT {
            let mut truncated: String = description.chars().take(TOOL_DESCRIPTION_KEEP).collect();
            truncated.push_str(TRUNCATION_NOTICE);
            description = truncated;
        }

        Tool {
            tool_specification: ToolSpecification {
                name: tool.name,
                description,
                input_schema: InputSchema { json: tool.input_schema },
            },
        }
    }

    ///
    /// Build raw history turns from the non-final messages.
    ///
    /// Emits one turn per message, in input order. Messages with a role other
    /// than user or assistant are dropped.
    ///
    /// # Arguments
    ///  * `messages` - all input messages except the last
    ///  * `seen_tool_use_ids` - conversion-wide tool use id dedup set
    ///
    /// # Returns
    ///  * Raw turn list, not yet merged for alternation
    fn build_history(
        &self,
        messages: &[ClaudeMessage],
        seen_tool_use_ids: &mut HashSet<String>,
    ) -> Vec<HistoryEntry> {
        let mut raw_turns = Vec::with_capacity(messages.len());

        for msg in messages {
            match msg.role.as_str() {
                "user" => raw_turns.push(HistoryEntry::User(self.build_user_turn(msg))),
                "assistant" => raw_turns
                    .push(HistoryEntry::Assistant(self.build_assistant_turn(msg, seen_tool_use_ids))),
                other => self.debug(&format!("Skipping message with unsupported role: {}", other)),
            }
        }

        raw_turns
    }

    ///
    /// Build a user history turn: flattened text, normalized tool results,
    /// and any attached images.
    fn build_user_turn(&self, msg: &ClaudeMessage) -> UserInputMessage {
        let (content, tool_results) = self.extract_user_blocks(&msg.content);
        let images = self.extract_images(&msg.content);

        UserInputMessage {
            content,
            user_input_message_context: UserInputMessageContext {
                env_state: self.env_state.clone(),
                tool_results,
                tools: None,
            },
            origin: self.origin.clone(),
            images,
            model_id: None,
        }
    }

    ///
    /// Build an assistant history turn with deduplicated tool uses.
    ///
    /// A tool use id already recorded anywhere earlier in the conversion is
    /// dropped here; the backend rejects repeated ids.
    fn build_assistant_turn(
        &self,
        msg: &ClaudeMessage,
        seen_tool_use_ids: &mut HashSet<String>,
    ) -> AssistantResponseMessage {
        let content = self.extract_text(&msg.content);

        let mut tool_uses = Vec::new();
        if let ClaudeContent::Blocks(blocks) = &msg.content {
            for block in blocks {
                if let ClaudeContentBlock::ToolUse { id, name, input } = block {
                    if !id.is_empty() && seen_tool_use_ids.insert(id.clone()) {
                        tool_uses.push(ToolUseEntry {
                            tool_use_id: id.clone(),
                            name: name.clone(),
                            input: input.clone(),
                        });
                    }
                }
            }
        }

        AssistantResponseMessage {
            message_id: Uuid::new_v4().to_string(),
            content,
            tool_uses: if tool_uses.is_empty() { None } else { Some(tool_uses) },
        }
    }

    ///
    /// Collapse runs of consecutive user turns into single turns.
    ///
    /// The backend requires strict user/assistant alternation; consecutive
    /// user turns are buffered and flushed as one merged turn whenever an
    /// assistant turn (or the end of input) is reached.
    ///
    /// # Arguments
    ///  * `raw_turns` - turn list possibly containing same-role runs
    ///
    /// # Returns
    ///  * History with no two consecutive user turns
    fn merge_consecutive_user_turns(&self, raw_turns: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
        let mut history = Vec::with_capacity(raw_turns.len());
        let mut pending: Vec<UserInputMessage> = Vec::new();

        for entry in raw_turns {
            match entry {
                HistoryEntry::User(msg) => pending.push(msg),
                assistant @ HistoryEntry::Assistant(_) => {
                    if !pending.is_empty() {
                        let merged = self.merge_user_messages(std::mem::take(&mut pending));
                        history.push(HistoryEntry::User(merged));
                    }
                    history.push(assistant);
                }
            }
        }

        if !pending.is_empty() {
            let merged = self.merge_user_messages(pending);
            history.push(HistoryEntry::User(merged));
        }

        history
    }

    ///
    /// Merge buffered consecutive user turns into one.
    ///
    /// Non-empty contents are joined with a blank line. The first turn's
    /// context wins wholesale: tool results attached to later buffered turns
    /// are not unioned in, and per-turn images do not survive the merge.
    /// Origin is the first non-empty value, model id the first present one.
    fn merge_user_messages(&self, buffered: Vec<UserInputMessage>) -> UserInputMessage {
        if buffered.len() > 1 {
            self.debug(&format!("Merging {} consecutive user turn(s)", buffered.len()));
        }

        let mut contents = Vec::with_capacity(buffered.len());
        let mut base_context = None;
        let mut base_origin = None;
        let mut base_model = None;

        for msg in buffered {
            if base_context.is_none() {
                base_context = Some(msg.user_input_message_context);
            }
            if base_origin.is_none() && !msg.origin.is_empty() {
                base_origin = Some(msg.origin);
            }
            if base_model.is_none() {
                base_model = msg.model_id;
            }
            if !msg.content.is_empty() {
                contents.push(msg.content);
            }
        }

        UserInputMessage {
            content: contents.join("\n\n"),
            user_input_message_context: base_context.unwrap_or_else(|| UserInputMessageContext {
                env_state: self.env_state.clone(),
                tool_results: None,
                tools: None,
            }),
            origin: base_origin.unwrap_or_else(|| self.origin.clone()),
            images: None,
            model_id: base_model,
        }
    }

    ///
    /// Compose the current message from the last input message.
    ///
    /// Extracts prompt text, tool results and images, then wraps the prompt
    /// in delimiter sections. Fixed nesting order, outer to inner: SYSTEM
    /// PROMPT, TOOL DOCUMENTATION, CONTEXT ENTRY/USER MESSAGE. A pure
    /// tool-result reply composes to the empty string with no wrapper at all,
    /// since it continues the previous turn rather than uttering a new one.
    ///
    /// # Arguments
    ///  * `last_message` - the final input message, if any
    ///  * `tools` - request-scoped tool specifications
    ///  * `truncated_docs` - full descriptions queued during tool conversion
    ///  * `system` - optional system prompt
    ///  * `model` - client-supplied model name
    ///
    /// # Returns
    ///  * The composed current user input message
    fn compose_current_message(
        &self,
        last_message: Option<ClaudeMessage>,
        tools: Vec<Tool>,
        truncated_docs: &[TruncatedToolDoc],
        system: Option<SystemPrompt>,
        model: &str,
    ) -> UserInputMessage {
        let mut prompt = String::new();
        let mut tool_results = None;
        let mut images = None;

        if let Some(msg) = &last_message {
            if msg.role == "user" {
                images = self.extract_images(&msg.content);
                let (text, results) = self.extract_user_blocks(&msg.content);
                prompt = text;
                tool_results = results;
            }
        }

        let has_tool_result = tool_results.is_some();

        let context = UserInputMessageContext {
            env_state: self.env_state.clone(),
            tool_results,
            tools: if tools.is_empty() { None } else { Some(tools) },
        };

        let mut formatted = if has_tool_result && prompt.is_empty() {
            // Bare tool-result turn: a structural continuation, no wrapper.
            String::new()
        } else {
            format!(
                "--- CONTEXT ENTRY BEGIN ---\n\
                 Current time: {}\n\
                 --- CONTEXT ENTRY END ---\n\n\
                 --- USER MESSAGE BEGIN ---\n\
                 {}\n\
                 --- USER MESSAGE END ---",
                current_timestamp(),
                prompt
            )
        };

        if !truncated_docs.is_empty() {
            let docs: String = truncated_docs
                .iter()
                .map(|doc| {
                    format!("Tool: {}\nFull Description:\n{}\n", doc.name, doc.full_description)
                })
                .collect();
            formatted = format!(
                "--- TOOL DOCUMENTATION BEGIN ---\n{}--- TOOL DOCUMENTATION END ---\n\n{}",
                docs, formatted
            );
        }

        if !formatted.is_empty() {
            if let Some(system_text) = system.map(|s| self.flatten_system_prompt(s)) {
                if !system_text.is_empty() {
                    formatted = format!(
                        "--- SYSTEM PROMPT BEGIN ---\n{}\n--- SYSTEM PROMPT END ---\n\n{}",
                        system_text, formatted
                    );
                }
            }
        }

        UserInputMessage {
            content: formatted,
            user_input_message_context: context,
            origin: self.origin.clone(),
            images,
            model_id: Some(map_model_name(model)),
        }
    }

    ///
    /// Flatten a system prompt to plain text.
    ///
    /// Array-form prompts keep only their text blocks, newline-joined.
    fn flatten_system_prompt(&self, system: SystemPrompt) -> String {
        match system {
            SystemPrompt::Text(text) => text,
            SystemPrompt::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    SystemBlock::Text { text } => Some(text.as_str()),
                    SystemBlock::Unknown => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    ///
    /// Extract flattened text and normalized tool results from user content.
    ///
    /// Text blocks are newline-joined in order. Tool result blocks normalize
    /// individually; results sharing a tool use id within the same message
    /// concatenate their content lists instead of duplicating the id.
    ///
    /// # Arguments
    ///  * `content` - the message content
    ///
    /// # Returns
    ///  * Flattened text and the tool results, None when no result block exists
    fn extract_user_blocks(&self, content: &ClaudeContent) -> (String, Option<Vec<ToolResult>>) {
        let blocks = match content {
            ClaudeContent::Text(text) => return (text.clone(), None),
            ClaudeContent::Blocks(blocks) => blocks,
        };

        let mut text_parts = Vec::new();
        let mut tool_results: Option<Vec<ToolResult>> = None;

        for block in blocks {
            match block {
                ClaudeContentBlock::Text { text } => text_parts.push(text.as_str()),
                ClaudeContentBlock::ToolResult { tool_use_id, status, content } => {
                    let normalized =
                        self.normalize_tool_result(tool_use_id, status.as_deref(), content);
                    Self::append_tool_result(
                        tool_results.get_or_insert_with(Vec::new),
                        normalized,
                    );
                }
                _ => {}
            }
        }

        (text_parts.join("\n"), tool_results)
    }

    ///
    /// Normalize one tool result block.
    ///
    /// String content wraps as a single entry; list items map in order per
    /// their kind. When every collected entry is empty or whitespace-only the
    /// whole list collapses to the cancellation sentinel, because the backend
    /// rejects turns with empty tool-result content.
    ///
    /// # Arguments
    ///  * `tool_use_id` - id of the tool use this result answers
    ///  * `status` - result status, defaults to "success"
    ///  * `content` - raw nested content
    ///
    /// # Returns
    ///  * Normalized tool result with a guaranteed non-empty content list
    fn normalize_tool_result(
        &self,
        tool_use_id: &str,
        status: Option<&str>,
        content: &ToolResultContent,
    ) -> ToolResult {
        let mut entries: Vec<ToolResultContentEntry> = match content {
            ToolResultContent::Text(text) => {
                vec![ToolResultContentEntry { text: text.clone() }]
            }
            ToolResultContent::Items(items) => items
                .iter()
                .filter_map(|item| match item {
                    ToolResultItem::Entry { text } => {
                        Some(ToolResultContentEntry { text: text.clone() })
                    }
                    ToolResultItem::Plain(text) => {
                        Some(ToolResultContentEntry { text: text.clone() })
                    }
                    ToolResultItem::Other(_) => None,
                })
                .collect(),
            ToolResultContent::Other(_) => Vec::new(),
        };

        if entries.iter().all(|entry| entry.text.trim().is_empty()) {
            entries = vec![ToolResultContentEntry { text: CANCELLED_TOOL_RESULT.to_string() }];
        }

        ToolResult {
            tool_use_id: tool_use_id.to_string(),
            content: entries,
            status: status.unwrap_or(STATUS_SUCCESS).to_string(),
        }
    }

    ///
    /// Append a normalized result, merging with an existing one by id.
    fn append_tool_result(results: &mut Vec<ToolResult>, normalized: ToolResult) {
        if let Some(existing) =
            results.iter_mut().find(|r| r.tool_use_id == normalized.tool_use_id)
        {
            existing.content.extend(normalized.content);
        } else {
            results.push(normalized);
        }
    }

    ///
    /// Extract flattened text from message content.
    ///
    /// Strings pass through verbatim; block lists newline-join their text
    /// blocks, ignoring everything else.
    fn extract_text(&self, content: &ClaudeContent) -> String {
        match content {
            ClaudeContent::Text(text) => text.clone(),
            ClaudeContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ClaudeContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    ///
    /// Extract base64 image blocks from message content.
    ///
    /// Returns None, not an empty list, when no image block exists, so that
    /// callers can distinguish "no images" from "images present but filtered"
    /// and the serialized turn omits the field entirely.
    fn extract_images(&self, content: &ClaudeContent) -> Option<Vec<ImageBlock>> {
        let ClaudeContent::Blocks(blocks) = content else {
            return None;
        };

        let images: Vec<ImageBlock> = blocks
            .iter()
            .filter_map(|block| match block {
                ClaudeContentBlock::Image { source } if source.source_type == "base64" => {
                    let media_type = source.media_type.as_deref().unwrap_or(DEFAULT_MEDIA_TYPE);
                    let format = match media_type.rsplit_once('/') {
                        Some((_, suffix)) => suffix,
                        None => "png",
                    };
                    Some(ImageBlock {
                        format: format.to_string(),
                        source: ImageSourceBytes {
                            bytes: source.data.clone().unwrap_or_default(),
                        },
                    })
                }
                _ => None,
            })
            .collect();

        if images.is_empty() { None } else { Some(images) }
    }

    ///
    /// Log debug message if trace logging is enabled.
    ///
    /// # Arguments
    ///  * `msg` - debug message to log
    pub(crate) fn debug(&self, msg: &str) {
        if self.log_level.is_trace_enabled() {
            tracing::debug!("[TRACE] {}", msg);
        }
    }
}
