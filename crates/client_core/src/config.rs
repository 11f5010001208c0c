use std::{collections::HashMap, fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    pub predict_path: String,
    pub reveal_delay_ms: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5001".into(),
            predict_path: shared::protocol::PREDICT_PATH.into(),
            reveal_delay_ms: 10,
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn endpoint_url(&self) -> Result<Url, ClientError> {
        let invalid = |source| ClientError::InvalidUrl {
            url: self.server_url.clone(),
            source,
        };
        let base = Url::parse(&self.server_url).map_err(invalid)?;
        base.join(&self.predict_path).map_err(invalid)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Defaults, then `path` if it exists, then the process environment.
pub fn load_settings(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!("ignoring client settings file: expected flat string table");
        return;
    };

    if let Some(v) = file_cfg.get("server_url") {
        settings.server_url = v.clone();
    }
    if let Some(v) = file_cfg.get("predict_path") {
        settings.predict_path = v.clone();
    }
    if let Some(v) = file_cfg.get("reveal_delay_ms") {
        if let Ok(parsed) = v.parse() {
            settings.reveal_delay_ms = parsed;
        }
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        if let Ok(parsed) = v.parse() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("PREDICT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__PREDICT_PATH") {
        settings.predict_path = v;
    }

    if let Some(v) = lookup("APP__REVEAL_DELAY_MS") {
        if let Ok(parsed) = v.parse() {
            settings.reveal_delay_ms = parsed;
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
