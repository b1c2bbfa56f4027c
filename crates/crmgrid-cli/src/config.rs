// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use crmgrid_crm::ListKind;
use log::LevelFilter;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "crmgrid";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 25;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DEMO_SEED: u64 = 42;
const DEFAULT_DEMO_ROWS: i64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub table: TableSection,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub demo: Demo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            table: TableSection::default(),
            ui: Ui::default(),
            log: Log::default(),
            demo: Demo::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSection {
    pub page_size: Option<i64>,
}

impl Default for TableSection {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            path: None,
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Demo {
    pub seed: Option<u64>,
    pub rows: Option<i64>,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            seed: Some(DEFAULT_DEMO_SEED),
            rows: Some(DEFAULT_DEMO_ROWS),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("CRMGRID_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set CRMGRID_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
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
                    "config file {} has no version; add `version = 1` at the top",
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
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(page_size) = self.table.page_size
            && page_size <= 0
        {
            bail!(
                "table.page_size in {} must be positive, got {}",
                path.display(),
                page_size
            );
        }

        if let Some(tab) = &self.ui.start_tab
            && ListKind::parse(tab).is_none()
        {
            bail!(
                "ui.start_tab in {} must be one of leads, activities, orders, quotes; got {:?}",
                path.display(),
                tab
            );
        }

        if let Some(level) = &self.log.level {
            level.parse::<LevelFilter>().map_err(|_| {
                anyhow!(
                    "log.level in {} must be off, error, warn, info, debug or trace; got {:?}",
                    path.display(),
                    level
                )
            })?;
        }

        if let Some(rows) = self.demo.rows
            && rows <= 0
        {
            bail!(
                "demo.rows in {} must be positive, got {}",
                path.display(),
                rows
            );
        }

        Ok(())
    }

    pub fn page_size(&self) -> usize {
        positive(self.table.page_size, DEFAULT_PAGE_SIZE)
    }

    pub fn start_tab(&self) -> ListKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(ListKind::parse)
            .unwrap_or(ListKind::Leads)
    }

    /// Config value, then `CRMGRID_LOG_PATH`, then the platform data dir.
    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("CRMGRID_LOG_PATH") {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path or CRMGRID_LOG_PATH")
        })?;
        Ok(data_root.join(APP_NAME).join("crmgrid.log"))
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log
            .level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn demo_seed(&self) -> u64 {
        self.demo.seed.unwrap_or(DEFAULT_DEMO_SEED)
    }

    pub fn demo_rows(&self) -> usize {
        positive(self.demo.rows, DEFAULT_DEMO_ROWS)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# crmgrid config\n# Place this file at: {}\n\nversion = 1\n\n[table]\n# Rows per page in every list view.\npage_size = {}\n\n[ui]\n# One of: leads, activities, orders, quotes\nstart_tab = \"leads\"\n\n[log]\n# Optional. Default is the platform data dir (for example ~/.local/share/crmgrid/crmgrid.log)\n# path = \"/absolute/path/to/crmgrid.log\"\n# One of: off, error, warn, info, debug, trace\nlevel = \"{}\"\n\n[demo]\n# Used with --demo.\nseed = {}\nrows = {}\n",
            path.display(),
            DEFAULT_PAGE_SIZE,
            DEFAULT_LOG_LEVEL,
            DEFAULT_DEMO_SEED,
            DEFAULT_DEMO_ROWS,
        )
    }
}

fn positive(value: Option<i64>, default: i64) -> usize {
    usize::try_from(value.unwrap_or(default))
        .ok()
        .filter(|value| *value > 0)
        .unwrap_or(default as usize)
}
