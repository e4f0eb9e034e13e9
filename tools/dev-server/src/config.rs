//! Server settings from the environment

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_WEB_DIR: &str = "web";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PORT`
    pub port: u16,
    /// `WEB_DIR`, the directory served as static files
    pub web_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            web_dir: PathBuf::from(DEFAULT_WEB_DIR),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup; unset or unparsable values fall back to defaults
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            web_dir: var("WEB_DIR")
                .filter(|d| !d.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.web_dir),
        }
    }
}
