// zai_chat: single-turn chat completion with optional system prompt and history

use crate::config::ModelDefaults;
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{
    json_schema_array, json_schema_enum, json_schema_integer, json_schema_number,
    json_schema_object, json_schema_string, NO_RESPONSE,
};
use serde::Deserialize;
use zai_client::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub const NAME: &str = "zai_chat";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatArgs {
    pub message: String,
    pub system: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub model: Option<String>,
}

impl ChatArgs {
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.message.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "'message' must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Messages go out as: system prompt, history in order, then the new message.
    pub fn into_request(self, defaults: &ModelDefaults) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        if let Some(system) = self.system.filter(|s| !s.trim().is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.extend(self.history);
        messages.push(ChatMessage::user(self.message));

        ChatCompletionRequest {
            model: self
                .model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| defaults.model.clone()),
            messages,
            temperature: self
                .temperature
                .unwrap_or(defaults.temperature)
                .clamp(0.0, 1.0),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens).max(1),
        }
    }
}

pub fn schema() -> ToolSchema {
    let history_entry = json_schema_object(
        serde_json::json!({
            "role": json_schema_enum("Who wrote the message", &["system", "user", "assistant"], "user"),
            "content": json_schema_string("Message text")
        }),
        vec!["role", "content"],
    );

    ToolSchema {
        name: NAME.to_string(),
        description: "Chat with a z.ai GLM model. Sends the message (plus optional system prompt \
                      and prior conversation) and returns the model's reply."
            .to_string(),
        input_schema: json_schema_object(
            serde_json::json!({
                "message": json_schema_string("The message to send to the model"),
                "system": json_schema_string("Optional system prompt that sets the assistant's behaviour"),
                "history": json_schema_array(history_entry, "Earlier conversation turns, oldest first"),
                "temperature": json_schema_number("Sampling temperature (defaults to the server setting)", 0.0, 1.0),
                "max_tokens": json_schema_integer("Maximum tokens to generate (defaults to the server setting)", 1, None),
                "model": json_schema_string("Model identifier (defaults to the server setting)")
            }),
            vec!["message"],
        ),
    }
}

pub fn render(response: &ChatCompletionResponse) -> String {
    response.first_content().unwrap_or(NO_RESPONSE).to_string()
}
