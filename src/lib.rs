pub mod config;
pub mod environment;
pub mod server;
pub mod tools;

pub use config::{Config, ServerSettings, Transport};
pub use tools::{
    ProviderClient,
    ProviderSettings,
    ProviderToolHandler,
    ToolKind,
    ToolMeta,
    ToolOutcome,
    ToolsMeta,
    list_tools,
};
