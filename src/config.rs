use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::tools::ToolKind;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Sse,
    Stdio,
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sse" | "http" => Ok(Transport::Sse),
            "stdio" => Ok(Transport::Stdio),
            other => Err(format!("unknown transport '{other}' (expected 'sse' or 'stdio')")),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Sse => f.write_str("sse"),
            Transport::Stdio => f.write_str("stdio"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub transport: Option<Transport>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub features: HashMap<String, bool>,
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
    #[serde(default)]
    pub server: Option<ServerConfig>,
}

/// Listener settings resolved from config and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub transport: Transport,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            transport: Transport::default(),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(contents)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Looks for `config.toml` in `$SEARCH1API_CONFIG`, next to the
    /// executable, then in the working directory.
    pub fn load_default() -> Self {
        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                info!(path = %candidate.display(), "using config file");
                return Self::load_from_path(candidate);
            }
        }

        info!("no config.toml found, using defaults");
        Self::default()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(p) = std::env::var("SEARCH1API_CONFIG") {
            paths.push(PathBuf::from(p));
        }
        if let Ok(mut exe_path) = std::env::current_exe() {
            exe_path.pop();
            paths.push(exe_path.join("config.toml"));
        }
        paths.push(PathBuf::from("config.toml"));
        paths
    }

    pub fn is_enabled(&self, kind: ToolKind) -> bool {
        self.features
            .get(kind.name())
            .copied()
            .unwrap_or_else(|| kind.enabled_by_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_enables_default_tools_only() {
        let cfg = Config::default();
        assert!(cfg.is_enabled(ToolKind::Search));
        assert!(cfg.is_enabled(ToolKind::News));
        assert!(cfg.is_enabled(ToolKind::Crawl));
        assert!(!cfg.is_enabled(ToolKind::Sitemap));
    }

    #[test]
    fn parses_all_sections() {
        let cfg = Config::parse(
            r#"
            [features]
            sitemap = true
            news = false

            [provider]
            api_key = "abc"
            base_url = "http://localhost:9000"

            [server]
            host = "127.0.0.1"
            port = 8080
            transport = "stdio"
            "#,
        )
        .unwrap();
        assert!(cfg.is_enabled(ToolKind::Sitemap));
        assert!(!cfg.is_enabled(ToolKind::News));
        let provider = cfg.provider.unwrap();
        assert_eq!(provider.api_key.as_deref(), Some("abc"));
        let server = cfg.server.unwrap();
        assert_eq!(server.port, Some(8080));
        assert_eq!(server.transport, Some(Transport::Stdio));
    }

    #[test]
    fn bad_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("search1api-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "features = [not valid").unwrap();
        let cfg = Config::load_from_path(&path);
        assert!(cfg.features.is_empty());
        assert!(cfg.provider.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn transport_from_str() {
        assert_eq!("SSE".parse::<Transport>().unwrap(), Transport::Sse);
        assert_eq!("stdio".parse::<Transport>().unwrap(), Transport::Stdio);
        assert!("carrier-pigeon".parse::<Transport>().is_err());
    }

    #[test]
    fn default_server_binds_all_interfaces() {
        assert_eq!(ServerSettings::default().bind_addr(), "0.0.0.0:3001");
    }
}
