use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::Value;

use super::kind::ToolKind;
use super::utils::{present_arg, str_arg};

pub const DEFAULT_MAX_RESULTS: u64 = 10;
pub const MAX_RESULTS_RANGE: RangeInclusive<u64> = 1..=50;
pub const DEFAULT_SEARCH_SERVICE: &str = "google";

/// Body of a `/search` or `/news` provider call.
///
/// `query` is forwarded exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchArgs {
    pub query: Value,
    pub max_results: u64,
    pub search_service: String,
}

/// Body of a `/crawl` or `/sitemap` provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlArgs {
    pub url: Value,
}

/// Tool arguments after validation and default filling.
///
/// Serializes to exactly the JSON body the provider expects for the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolRequest {
    Search(SearchArgs),
    News(SearchArgs),
    Crawl(UrlArgs),
    Sitemap(UrlArgs),
}

impl ToolRequest {
    /// Decodes raw call arguments for `kind`.
    ///
    /// On a missing required field the error is the user-facing failure text
    /// for that tool; nothing is sent upstream in that case.
    pub fn decode(kind: ToolKind, arguments: &HashMap<String, Value>) -> Result<Self, &'static str> {
        match kind {
            ToolKind::Search => SearchArgs::decode(arguments)
                .map(ToolRequest::Search)
                .ok_or(kind.missing_argument_message()),
            ToolKind::News => SearchArgs::decode(arguments)
                .map(ToolRequest::News)
                .ok_or(kind.missing_argument_message()),
            ToolKind::Crawl => UrlArgs::decode(arguments)
                .map(ToolRequest::Crawl)
                .ok_or(kind.missing_argument_message()),
            ToolKind::Sitemap => UrlArgs::decode(arguments)
                .map(ToolRequest::Sitemap)
                .ok_or(kind.missing_argument_message()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::Search(_) => ToolKind::Search,
            ToolRequest::News(_) => ToolKind::News,
            ToolRequest::Crawl(_) => ToolKind::Crawl,
            ToolRequest::Sitemap(_) => ToolKind::Sitemap,
        }
    }
}

impl SearchArgs {
    fn decode(arguments: &HashMap<String, Value>) -> Option<Self> {
        let query = present_arg(arguments, "query")?;
        let max_results = arguments
            .get("max_results")
            .and_then(number_arg)
            .map(clamp_max_results)
            .unwrap_or(DEFAULT_MAX_RESULTS);
        let search_service = str_arg(arguments, "search_service")
            .unwrap_or_else(|| DEFAULT_SEARCH_SERVICE.to_string());
        Some(Self {
            query,
            max_results,
            search_service,
        })
    }
}

impl UrlArgs {
    fn decode(arguments: &HashMap<String, Value>) -> Option<Self> {
        present_arg(arguments, "url").map(|url| Self { url })
    }
}

fn number_arg(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn clamp_max_results(n: f64) -> u64 {
    let lo = *MAX_RESULTS_RANGE.start() as f64;
    let hi = *MAX_RESULTS_RANGE.end() as f64;
    n.clamp(lo, hi) as u64
}
