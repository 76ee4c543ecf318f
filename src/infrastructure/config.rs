use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    /// Prefix for backend links rendered into pages; empty means same origin.
    #[serde(default)]
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiSettings {
    #[serde(default = "default_banner_dismiss_secs")]
    pub banner_dismiss_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            banner_dismiss_secs: default_banner_dismiss_secs(),
        }
    }
}

impl UiSettings {
    pub fn banner_ttl(&self) -> Duration {
        Duration::from_secs(self.banner_dismiss_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_banner_dismiss_secs() -> u64 {
    5
}

/// `config/client.toml` overridden by `ASSET_CLIENT__SECTION__KEY` variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/client").required(false))
        .add_source(config::Environment::with_prefix("ASSET_CLIENT").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
