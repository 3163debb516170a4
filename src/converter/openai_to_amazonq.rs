//!
//! OpenAI to Amazon Q format converter for API request translation.
//!
//! Converts OpenAI-compatible chat completion requests to the Amazon Q
//! conversation format. This path is text-only: the whole message list is
//! flattened into a single role-annotated transcript carried by the current
//! message, with an empty turn history.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use serde::Deserialize;
use uuid::Uuid;

use crate::config::{Config, LogLevel};
use crate::converter::amazonq::{
    AmazonQRequest, ConversationState, CurrentMessage, EnvState, UserInputMessage,
    UserInputMessageContext,
};
use crate::error::Result;

/* --- types ----------------------------------------------------------------------------------- */

///
/// OpenAI chat completion request structure.
///
/// Only the fields this conversion direction consumes are modeled; sampling
/// parameters and tool definitions on this path are ignored.
#[derive(Debug, Deserialize)]
pub struct OpenAiRequest {
    /** the model identifier, passed through to the backend */
    pub model: Option<String>,
    /** conversation messages array */
    pub messages: Vec<OpenAiMessage>,
}

///
/// OpenAI message structure within a chat completion request.
#[derive(Debug, Deserialize)]
pub struct OpenAiMessage {
    /** message role: system, user, assistant, or tool */
    #[serde(default = "default_role")]
    pub role: String,
    /** message content, string or structured segments */
    #[serde(default)]
    pub content: Option<OpenAiContent>,
}

///
/// OpenAI content union type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OpenAiContent {
    /** simple string content */
    String(String),
    /** structured content segments array */
    Array(Vec<OpenAiSegment>),
}

///
/// One segment of array-form OpenAI content.
///
/// Text-bearing objects and plain strings contribute to the transcript;
/// anything else (image refs, audio, …) is dropped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OpenAiSegment {
    /** object carrying a text field */
    Text { text: String },
    /** bare string segment */
    Plain(String),
    /** any other segment kind, dropped */
    Other(serde_json::Value),
}

///
/// Converter from OpenAI format to Amazon Q format.
///
/// Follows Single Responsibility Principle - handles only the text-only
/// flattening of OpenAI conversations into an Amazon Q current message.
pub struct OpenAiToAmazonQConverter {
    /** environment descriptor stamped on the current message */
    env_state: EnvState,
    /** origin marker stamped on the current message */
    origin: String,
    /** logging level for debug output */
    log_level: LogLevel,
}

/* --- constants ------------------------------------------------------------------------------ */

/** Model identifier used when the request does not name one */
const DEFAULT_MODEL_ID: &str = "claude-sonnet-4";

/** Fixed chat trigger type expected by the backend */
const CHAT_TRIGGER_MANUAL: &str = "MANUAL";

/* --- helper functions ----------------------------------------------------------------------- */

fn default_role() -> String {
    "user".to_string()
}

/* --- start of code -------------------------------------------------------------------------- */

impl OpenAiToAmazonQConverter {
    ///
    /// Create a new OpenAI to Amazon Q converter.
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
    /// Convert an OpenAI request to an Amazon Q request.
    ///
    /// The conversation is flattened to a single `role:\ncontent` transcript
    /// wrapped in one CONTEXT ENTRY / USER MESSAGE pair; the turn history
    /// stays empty and a fresh conversation id is assigned.
    ///
    /// # Arguments
    ///  * `request` - OpenAI format request to convert
    ///
    /// # Returns
    ///  * Converted Amazon Q format request
    pub fn convert(&self, request: OpenAiRequest) -> Result<AmazonQRequest> {
        self.debug(&format!(
            "Converting {} message(s) from OpenAI to Amazon Q format",
            request.messages.len()
        ));

        let transcript = self.messages_to_text(&request.messages);
        let content = format!(
            "--- CONTEXT ENTRY BEGIN ---\n\
             []\n\
             --- CONTEXT ENTRY END ---\n\n\
             --- USER MESSAGE BEGIN ---\n\
             {}--- USER MESSAGE END ---",
            transcript
        );

        let user_input_message = UserInputMessage {
            content,
            user_input_message_context: UserInputMessageContext {
                env_state: self.env_state.clone(),
                tool_results: None,
                tools: Some(Vec::new()),
            },
            origin: self.origin.clone(),
            images: None,
            model_id: Some(
                request.model.unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            ),
        };

        Ok(AmazonQRequest {
            conversation_state: ConversationState {
                conversation_id: Uuid::new_v4().to_string(),
                history: Vec::new(),
                current_message: CurrentMessage { user_input_message },
                chat_trigger_type: CHAT_TRIGGER_MANUAL.to_string(),
            },
        })
    }

    ///
    /// Flatten OpenAI messages into a role-annotated transcript.
    ///
    /// Each message contributes a `role:\ncontent` entry; entries are joined
    /// with blank lines. Array content keeps its text-bearing segments,
    /// newline-joined.
    fn messages_to_text(&self, messages: &[OpenAiMessage]) -> String {
        let mut lines = Vec::with_capacity(messages.len());

        for msg in messages {
            let content = match &msg.content {
                Some(OpenAiContent::String(text)) => text.clone(),
                Some(OpenAiContent::Array(segments)) => segments
                    .iter()
                    .filter_map(|segment| match segment {
                        OpenAiSegment::Text { text } => Some(text.as_str()),
                        OpenAiSegment::Plain(text) => Some(text.as_str()),
                        OpenAiSegment::Other(_) => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
                None => String::new(),
            };
            lines.push(format!("{}:\n{}", msg.role, content));
        }

        lines.join("\n\n")
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
