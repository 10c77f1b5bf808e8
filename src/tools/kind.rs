use std::fmt;
use std::str::FromStr;

use mcp_protocol_sdk::prelude::*;

/// Every tool this server knows how to relay to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Search,
    News,
    Crawl,
    Sitemap,
}

impl ToolKind {
    /// Catalog order.
    pub const ALL: [ToolKind; 4] = [ToolKind::Search, ToolKind::News, ToolKind::Crawl, ToolKind::Sitemap];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Search => "search",
            ToolKind::News => "news",
            ToolKind::Crawl => "crawl",
            ToolKind::Sitemap => "sitemap",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            ToolKind::Search => "/search",
            ToolKind::News => "/news",
            ToolKind::Crawl => "/crawl",
            ToolKind::Sitemap => "/sitemap",
        }
    }

    /// Key of the provider response that carries the payload.
    pub fn result_field(self) -> &'static str {
        match self {
            ToolKind::Sitemap => "links",
            _ => "results",
        }
    }

    pub fn missing_argument_message(self) -> &'static str {
        match self {
            ToolKind::Search => "Search query is required",
            ToolKind::News => "News search query is required",
            ToolKind::Crawl | ToolKind::Sitemap => "URL is required",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            ToolKind::Search => "Failed to retrieve search results",
            ToolKind::News => "Failed to retrieve news results",
            ToolKind::Crawl => "Failed to crawl URL",
            ToolKind::Sitemap => "Failed to retrieve sitemap",
        }
    }

    // sitemap is opt-in through `[features]`
    pub fn enabled_by_default(self) -> bool {
        !matches!(self, ToolKind::Sitemap)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| McpError::ToolNotFound(format!("Unknown tool: {s}")))
    }
}
