// zai_summarize: summarization through the chat completion endpoint

use crate::config::ModelDefaults;
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_enum, json_schema_object, json_schema_string, NO_RESPONSE};
use serde::Deserialize;
use zai_client::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub const NAME: &str = "zai_summarize";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    pub const VALUES: [&'static str; 3] = ["short", "medium", "long"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    #[default]
    Paragraph,
    BulletPoints,
    KeyPoints,
}

impl SummaryStyle {
    pub const VALUES: [&'static str; 3] = ["paragraph", "bullet_points", "key_points"];

    /// Wording used inside the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::BulletPoints => "bullet points",
            Self::KeyPoints => "key points",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummarizeArgs {
    pub text: String,
    #[serde(default)]
    pub length: SummaryLength,
    #[serde(default)]
    pub style: SummaryStyle,
}

impl SummarizeArgs {
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.text.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "'text' must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are a helpful assistant that creates clear, accurate summaries. \
             Create a {} summary in {} format.",
            self.length.as_str(),
            self.style.label()
        )
    }

    pub fn into_request(self, defaults: &ModelDefaults) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: defaults.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt()),
                ChatMessage::user(self.text),
            ],
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }
}

pub fn schema() -> ToolSchema {
    ToolSchema {
        name: NAME.to_string(),
        description: "Summarize a piece of text with a z.ai GLM model, at the requested length \
                      and in the requested style."
            .to_string(),
        input_schema: json_schema_object(
            serde_json::json!({
                "text": json_schema_string("The text to summarize"),
                "length": json_schema_enum("Summary length", &SummaryLength::VALUES, "medium"),
                "style": json_schema_enum("Summary format", &SummaryStyle::VALUES, "paragraph")
            }),
            vec!["text"],
        ),
    }
}

pub fn render(response: &ChatCompletionResponse) -> String {
    response.first_content().unwrap_or(NO_RESPONSE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let args: SummarizeArgs = serde_json::from_value(json!({"text": "long text"})).unwrap();
        assert_eq!(args.length, SummaryLength::Medium);
        assert_eq!(args.style, SummaryStyle::Paragraph);
        assert_eq!(
            args.system_prompt(),
            "You are a helpful assistant that creates clear, accurate summaries. \
             Create a medium summary in paragraph format."
        );
    }

    #[test]
    fn test_prompt_uses_length_and_style() {
        let args: SummarizeArgs = serde_json::from_value(json!({
            "text": "long text",
            "length": "short",
            "style": "bullet_points"
        }))
        .unwrap();

        assert!(args
            .system_prompt()
            .ends_with("Create a short summary in bullet points format."));
    }

    #[test]
    fn test_request_shape() {
        let args: SummarizeArgs = serde_json::from_value(json!({"text": "long text"})).unwrap();
        let request = args.into_request(&ModelDefaults::default());

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[1], ChatMessage::user("long text"));
        assert_eq!(request.model, ModelDefaults::default().model);
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        assert!(serde_json::from_value::<SummarizeArgs>(json!({"text": "t", "length": "huge"})).is_err());
        assert!(serde_json::from_value::<SummarizeArgs>(json!({"text": "t", "style": "haiku"})).is_err());
    }
}
