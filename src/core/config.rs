//! Configuration from the environment (optionally loaded from `.env`).

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use super::reveal::DEFAULT_REVEAL_INTERVAL_MS;

pub const DEFAULT_UPSTREAM_URL: &str = "http://20.124.64.147:5001";
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:7071/api/proxy";
pub const DEFAULT_BIND: &str = "127.0.0.1:7071";

/// Path of the chatbot route on the upstream host.
pub const UPSTREAM_ROUTE: &str = "/GetChatbotResponse";

/// Where the chat client sends its questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EndpointMode {
    /// Call the upstream chatbot host directly.
    #[default]
    Direct,
    /// Go through the relay proxy.
    Proxy,
}

impl fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointMode::Direct => write!(f, "direct"),
            EndpointMode::Proxy => write!(f, "proxy"),
        }
    }
}

impl FromStr for EndpointMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(EndpointMode::Direct),
            "proxy" => Ok(EndpointMode::Proxy),
            _ => Err(ConfigError::InvalidEndpointMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream chatbot host (no trailing route).
    pub upstream_url: String,
    pub endpoint_mode: EndpointMode,
    /// Proxy endpoint used by clients in `Proxy` mode.
    pub proxy_url: String,
    /// Address the proxy server binds to.
    pub bind: SocketAddr,
    pub reveal_interval: Duration,
    pub show_timestamps: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("EQX_CHAT_ENDPOINT must be 'direct' or 'proxy', got '{0}'")]
    InvalidEndpointMode(String),
    #[error("EQX_CHAT_BIND is not a valid socket address: '{0}'")]
    InvalidBind(String),
    #[error("EQX_CHAT_REVEAL_MS must be a positive integer, got '{0}'")]
    InvalidRevealInterval(String),
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

impl Config {
    /// Endpoint the chat client should call, resolved from the mode.
    pub fn chatbot_endpoint(&self) -> String {
        match self.endpoint_mode {
            EndpointMode::Direct => self.upstream_endpoint(),
            EndpointMode::Proxy => self.proxy_url.clone(),
        }
    }

    /// The upstream chatbot route. The proxy always calls this one.
    pub fn upstream_endpoint(&self) -> String {
        format!("{}{}", self.upstream_url.trim_end_matches('/'), UPSTREAM_ROUTE)
    }
}

fn check_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidUrl { name, value })
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Build the configuration from an arbitrary variable lookup.
pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let upstream_url = check_url(
        "EQX_CHAT_UPSTREAM_URL",
        lookup("EQX_CHAT_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
    )?;
    let proxy_url = check_url(
        "EQX_CHAT_PROXY_URL",
        lookup("EQX_CHAT_PROXY_URL").unwrap_or_else(|| DEFAULT_PROXY_URL.to_string()),
    )?;

    let endpoint_mode = match lookup("EQX_CHAT_ENDPOINT") {
        Some(v) => v.parse()?,
        None => EndpointMode::default(),
    };

    let bind_raw = lookup("EQX_CHAT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
    let bind = bind_raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidBind(bind_raw.clone()))?;

    let reveal_interval = match lookup("EQX_CHAT_REVEAL_MS") {
        Some(v) => match v.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Duration::from_millis(ms),
            _ => return Err(ConfigError::InvalidRevealInterval(v)),
        },
        None => Duration::from_millis(DEFAULT_REVEAL_INTERVAL_MS),
    };

    let show_timestamps = lookup("EQX_CHAT_SHOW_TIMESTAMPS")
        .map(|v| is_enabled(&v))
        .unwrap_or(false);

    Ok(Config {
        upstream_url,
        endpoint_mode,
        proxy_url,
        bind,
        reveal_interval,
        show_timestamps,
    })
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from_lookup(|_| None).unwrap();
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.endpoint_mode, EndpointMode::Direct);
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(
            config.reveal_interval,
            Duration::from_millis(DEFAULT_REVEAL_INTERVAL_MS)
        );
        assert!(!config.show_timestamps);
    }

    #[test]
    fn direct_mode_resolves_upstream_route() {
        let config = from_lookup(lookup_from(&[(
            "EQX_CHAT_UPSTREAM_URL",
            "http://localhost:5001/",
        )]))
        .unwrap();
        assert_eq!(
            config.chatbot_endpoint(),
            "http://localhost:5001/GetChatbotResponse"
        );
    }

    #[test]
    fn proxy_mode_resolves_proxy_url() {
        let config = from_lookup(lookup_from(&[
            ("EQX_CHAT_ENDPOINT", "Proxy"),
            ("EQX_CHAT_PROXY_URL", "https://chat.example.com/api/proxy"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint_mode, EndpointMode::Proxy);
        assert_eq!(
            config.chatbot_endpoint(),
            "https://chat.example.com/api/proxy"
        );
        assert!(config.upstream_endpoint().ends_with(UPSTREAM_ROUTE));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = from_lookup(lookup_from(&[("EQX_CHAT_ENDPOINT", "sideways")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpointMode(_)));

        let err = from_lookup(lookup_from(&[("EQX_CHAT_BIND", "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind(_)));

        let err = from_lookup(lookup_from(&[("EQX_CHAT_REVEAL_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRevealInterval(_)));

        let err = from_lookup(lookup_from(&[("EQX_CHAT_UPSTREAM_URL", "ftp://x")])).unwrap_err();
        assert!(err.to_string().contains("EQX_CHAT_UPSTREAM_URL"));
    }

    #[test]
    fn timestamps_flag_accepts_common_truthy_values() {
        for v in ["1", "true", "YES", "on"] {
            let config =
                from_lookup(lookup_from(&[("EQX_CHAT_SHOW_TIMESTAMPS", v)])).unwrap();
            assert!(config.show_timestamps, "{v}");
        }
        let config = from_lookup(lookup_from(&[("EQX_CHAT_SHOW_TIMESTAMPS", "0")])).unwrap();
        assert!(!config.show_timestamps);
    }
}
