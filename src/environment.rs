use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use url::Url;

use crate::config::{Config, ServerSettings, Transport};
use crate::tools::ProviderSettings;
use crate::tools::provider::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "SEARCH1API_KEY";

pub fn load_env() {
    let _ = dotenvy::dotenv();

    if let Ok(mut exe_path) = std::env::current_exe() {
        exe_path.pop();
        let env_path: PathBuf = exe_path.join(".env");
        if env_path.exists() {
            let _ = dotenvy::from_path(&env_path);
        }
    }
}

pub fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_api_key_with(cfg: &Config, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup(API_KEY_VAR).or_else(|| {
        cfg.provider
            .as_ref()
            .and_then(|p| p.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    })
}

/// Resolves the provider settings; a missing API key is fatal.
pub fn provider_settings(cfg: &Config) -> Result<ProviderSettings> {
    provider_settings_with(cfg, var)
}

pub fn provider_settings_with(cfg: &Config, lookup: impl Fn(&str) -> Option<String>) -> Result<ProviderSettings> {
    let Some(api_key) = get_api_key_with(cfg, &lookup) else {
        bail!("{API_KEY_VAR} environment variable is not set");
    };

    let raw = lookup("SEARCH1API_BASE_URL")
        .or_else(|| cfg.provider.as_ref().and_then(|p| p.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(&raw).with_context(|| format!("invalid provider base url '{raw}'"))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        bail!("provider base url must be http(s), got '{raw}'");
    }

    Ok(ProviderSettings::new(api_key, base_url))
}

pub fn server_settings(cfg: &Config) -> Result<ServerSettings> {
    server_settings_with(cfg, var)
}

pub fn server_settings_with(cfg: &Config, lookup: impl Fn(&str) -> Option<String>) -> Result<ServerSettings> {
    let defaults = ServerSettings::default();
    let file = cfg.server.clone().unwrap_or_default();

    let host = lookup("SEARCH1API_HOST").or(file.host).unwrap_or(defaults.host);
    let port = match lookup("SEARCH1API_PORT") {
        Some(p) => p.trim().parse::<u16>().with_context(|| format!("invalid SEARCH1API_PORT '{p}'"))?,
        None => file.port.unwrap_or(defaults.port),
    };
    let transport = match lookup("SEARCH1API_TRANSPORT") {
        Some(t) => t.parse::<Transport>().map_err(anyhow::Error::msg)?,
        None => file.transport.unwrap_or(defaults.transport),
    };

    Ok(ServerSettings { host, port, transport })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = provider_settings_with(&Config::default(), env(&[])).unwrap_err();
        assert!(err.to_string().contains("SEARCH1API_KEY"));
    }

    #[test]
    fn env_key_wins_over_config() {
        let cfg = Config::parse("[provider]\napi_key = \"from-file\"\n").unwrap();
        let s = provider_settings_with(&cfg, env(&[(API_KEY_VAR, "from-env")])).unwrap();
        assert_eq!(s.api_key, "from-env");
        let s = provider_settings_with(&cfg, env(&[])).unwrap();
        assert_eq!(s.api_key, "from-file");
        assert_eq!(s.base_url.as_str(), "https://api.search1api.com/");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = provider_settings_with(
            &Config::default(),
            env(&[(API_KEY_VAR, "k"), ("SEARCH1API_BASE_URL", "ftp://example.com")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("http"));
    }

    #[test]
    fn server_defaults_and_overrides() {
        let s = server_settings_with(&Config::default(), env(&[])).unwrap();
        assert_eq!(s, ServerSettings::default());

        let cfg = Config::parse("[server]\nport = 4000\n").unwrap();
        let s = server_settings_with(&cfg, env(&[("SEARCH1API_TRANSPORT", "stdio")])).unwrap();
        assert_eq!(s.port, 4000);
        assert_eq!(s.transport, Transport::Stdio);

        assert!(server_settings_with(&cfg, env(&[("SEARCH1API_PORT", "nope")])).is_err());
    }
}
