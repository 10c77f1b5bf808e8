use std::sync::OnceLock;

use serde_json::{Value, json};

use super::kind::ToolKind;
use super::meta::{ToolInputSchema, ToolMeta, ToolsMeta};
use super::request::{DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_SERVICE, MAX_RESULTS_RANGE};

static SEARCH_META: OnceLock<ToolMeta> = OnceLock::new();
static NEWS_META: OnceLock<ToolMeta> = OnceLock::new();
static CRAWL_META: OnceLock<ToolMeta> = OnceLock::new();
static SITEMAP_META: OnceLock<ToolMeta> = OnceLock::new();

fn query_schema(query_description: &str) -> ToolInputSchema {
    let properties = json!({
        "query": {
            "type": "string",
            "description": query_description
        },
        "max_results": {
            "type": "number",
            "description": format!("Maximum number of results to return (default: {DEFAULT_MAX_RESULTS})"),
            "default": DEFAULT_MAX_RESULTS,
            "minimum": MAX_RESULTS_RANGE.start(),
            "maximum": MAX_RESULTS_RANGE.end()
        },
        "search_service": {
            "type": "string",
            "description": format!("Search service to use (default: {DEFAULT_SEARCH_SERVICE})"),
            "default": DEFAULT_SEARCH_SERVICE
        }
    });
    ToolInputSchema::new("object", properties, vec!["query".to_string()])
}

fn url_schema(url_description: &str) -> ToolInputSchema {
    let properties: Value = json!({
        "url": { "type": "string", "description": url_description }
    });
    ToolInputSchema::new("object", properties, vec!["url".to_string()])
}

pub fn search_meta() -> ToolMeta {
    SEARCH_META
        .get_or_init(|| {
            ToolMeta::new("search", "Web Search", "A fast way to search the world", query_schema("Search query"))
        })
        .clone()
}

pub fn news_meta() -> ToolMeta {
    NEWS_META
        .get_or_init(|| {
            ToolMeta::new("news", "News Search", "Search for news articles", query_schema("News search query"))
        })
        .clone()
}

pub fn crawl_meta() -> ToolMeta {
    CRAWL_META
        .get_or_init(|| ToolMeta::new("crawl", "Crawl URL", "Extract content from URL", url_schema("URL to crawl")))
        .clone()
}

pub fn sitemap_meta() -> ToolMeta {
    SITEMAP_META
        .get_or_init(|| {
            ToolMeta::new(
                "sitemap",
                "Sitemap",
                "Get all related links from a URL",
                url_schema("URL to get sitemap"),
            )
        })
        .clone()
}

pub fn meta_for(kind: ToolKind) -> ToolMeta {
    match kind {
        ToolKind::Search => search_meta(),
        ToolKind::News => news_meta(),
        ToolKind::Crawl => crawl_meta(),
        ToolKind::Sitemap => sitemap_meta(),
    }
}

/// Descriptors of every enabled tool, in fixed catalog order.
pub fn list_tools(is_enabled: impl Fn(ToolKind) -> bool) -> ToolsMeta {
    ToolsMeta(
        ToolKind::ALL
            .into_iter()
            .filter(|kind| is_enabled(*kind))
            .map(meta_for)
            .collect(),
    )
}
