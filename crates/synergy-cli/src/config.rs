//! Settings: defaults, `synergy.toml`, `SYNERGY_*` environment variables,
//! then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "synergy.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub database: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    pub web_url: Option<String>,
    pub login_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database: None,
            host: "127.0.0.1".into(),
            port: 3030,
            web_url: None,
            login_delay_ms: 1000,
        }
    }
}

/// Values accepted in `synergy.toml`. Missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    data_dir: Option<PathBuf>,
    database: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    web_url: Option<String>,
    login_delay_ms: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("synergy")
}

impl Settings {
    /// Resolve settings from every source.
    pub fn load(config: Option<&Path>, data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let mut settings = Settings::default();

        // The config file lives in the data dir unless named explicitly.
        if let Some(dir) = data_dir.clone().or_else(|| env("SYNERGY_DATA_DIR").map(PathBuf::from)) {
            settings.data_dir = dir;
        }
        let config_path = config
            .map(Path::to_path_buf)
            .unwrap_or_else(|| settings.data_dir.join(CONFIG_FILE));
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            settings.apply_toml(&raw)
                .with_context(|| format!("parsing {}", config_path.display()))?;
        } else if config.is_some() {
            anyhow::bail!("config file not found: {}", config_path.display());
        }

        settings.apply_env(env);

        if let Some(dir) = data_dir {
            settings.data_dir = dir;
        }
        Ok(settings)
    }

    fn apply_toml(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.data_dir {
            self.data_dir = v;
        }
        if let Some(v) = file.database {
            self.database = Some(v);
        }
        if let Some(v) = file.host {
            self.host = v;
        }
        if let Some(v) = file.port {
            self.port = v;
        }
        if let Some(v) = file.web_url {
            self.web_url = Some(v);
        }
        if let Some(v) = file.login_delay_ms {
            self.login_delay_ms = v;
        }
        Ok(())
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("SYNERGY_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = env("SYNERGY_DATABASE") {
            self.database = Some(PathBuf::from(v));
        }
        if let Some(v) = env("SYNERGY_HOST") {
            self.host = v;
        }
        if let Some(v) = env("SYNERGY_PORT") {
            match v.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %v, "Ignoring invalid SYNERGY_PORT"),
            }
        }
        if let Some(v) = env("SYNERGY_WEB_URL") {
            self.web_url = Some(v);
        }
        if let Some(v) = env("SYNERGY_LOGIN_DELAY_MS") {
            match v.parse() {
                Ok(ms) => self.login_delay_ms = ms,
                Err(_) => tracing::warn!(value = %v, "Ignoring invalid SYNERGY_LOGIN_DELAY_MS"),
            }
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| self.data_dir.join("synergy.db"))
    }

    /// Base URL of a running server, for change notifications.
    pub fn web_url(&self) -> String {
        self.web_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
