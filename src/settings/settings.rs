use crate::domain::NetworkPolicy;
use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log: Log,
    #[serde(default)]
    pub network: Network,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Network {
    pub unique_profiles: bool,
    pub purge_requests_on_removal: bool,
}

impl Default for Network {
    fn default() -> Self {
        let policy = NetworkPolicy::default();
        Self {
            unique_profiles: policy.unique_profiles,
            purge_requests_on_removal: policy.purge_requests_on_removal,
        }
    }
}

impl From<Network> for NetworkPolicy {
    fn from(network: Network) -> Self {
        NetworkPolicy {
            unique_profiles: network.unique_profiles,
            purge_requests_on_removal: network.purge_requests_on_removal,
        }
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Loads settings from a TOML file, then applies `SOCIALNET__SECTION__KEY`
/// environment overrides.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(
            Environment::with_prefix("SOCIALNET")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
