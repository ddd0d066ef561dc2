pub mod chat;
mod schema;
pub mod search;
pub mod summarize;

pub use chat::ChatArgs;
pub use schema::{
    json_schema_array, json_schema_enum, json_schema_integer, json_schema_number,
    json_schema_object, json_schema_open_object, json_schema_string,
};
pub use search::SearchArgs;
pub use summarize::{SummarizeArgs, SummaryLength, SummaryStyle};

use crate::protocol::ToolSchema;
use std::fmt;

/// Text returned when a completion carries no content.
pub const NO_RESPONSE: &str = "No response from z.ai";

/// The fixed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Chat,
    Search,
    Summarize,
}

impl ToolKind {
    /// Catalog order.
    pub const ALL: [ToolKind; 3] = [ToolKind::Chat, ToolKind::Search, ToolKind::Summarize];

    pub fn name(self) -> &'static str {
        match self {
            Self::Chat => chat::NAME,
            Self::Search => search::NAME,
            Self::Summarize => summarize::NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn schema(self) -> ToolSchema {
        match self {
            Self::Chat => chat::schema(),
            Self::Search => search::schema(),
            Self::Summarize => summarize::schema(),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The static tool catalog, in [`ToolKind::ALL`] order.
pub fn catalog() -> Vec<ToolSchema> {
    ToolKind::ALL.into_iter().map(ToolKind::schema).collect()
}
