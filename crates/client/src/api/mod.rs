//! z.ai API endpoints.

pub mod chat;
pub mod search;

pub use chat::{
    ChatApi, ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ChoiceMessage, Role, Usage, CHAT_COMPLETIONS_PATH,
};
pub use search::{SearchApi, SearchRequest, SearchResponse, SearchResult, SEARCH_PATH};
