// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "intake";
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub show_help_hint: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            show_help_hint: Some(true),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("INTAKE_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set INTAKE_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [api] and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(per_page) = self.api.per_page
            && !(1..=100).contains(&per_page)
        {
            bail!(
                "api.per_page in {} must be between 1 and 100, got {}",
                path.display(),
                per_page
            );
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        Ok(())
    }

    /// Where the lead service lives: config first, then `INTAKE_API_URL`.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Some(base_url) = &self.api.base_url {
            return Ok(base_url.trim_end_matches('/').to_owned());
        }
        if let Some(base_url) = env::var_os("INTAKE_API_URL") {
            let base_url = base_url.to_string_lossy().trim_end_matches('/').to_owned();
            if !base_url.is_empty() {
                return Ok(base_url);
            }
        }
        bail!(
            "no lead service configured -- set [api].base_url or the INTAKE_API_URL environment variable (or run with --demo)"
        )
    }

    pub fn per_page(&self) -> u32 {
        self.api.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn show_help_hint(&self) -> bool {
        self.ui.show_help_hint.unwrap_or(true)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# intake config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Required unless INTAKE_API_URL is set or you run with --demo\n# base_url = \"http://localhost:8000/api\"\ntimeout = \"{}\"\nper_page = {}\n\n[ui]\nshow_help_hint = true\n",
            path.display(),
            DEFAULT_TIMEOUT,
            DEFAULT_PER_PAGE,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}
