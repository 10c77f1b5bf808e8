pub mod catalog;
pub mod handler;
pub mod kind;
pub mod meta;
pub mod provider;
pub mod request;
pub mod utils;

pub use catalog::{crawl_meta, list_tools, meta_for, news_meta, search_meta, sitemap_meta};
pub use handler::ProviderToolHandler;
pub use kind::ToolKind;
pub use meta::{ToolInputSchema, ToolMeta, ToolsMeta};
pub use provider::{ProviderClient, ProviderError, ProviderSettings};
pub use request::{SearchArgs, ToolRequest, UrlArgs};
pub use utils::ToolOutcome;
