// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Sends `log` records to `path`; the terminal belongs to the TUI.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {} -- set [log].path or CRMGRID_LOG_PATH to a writable file",
                path.display()
            )
        })?;

    WriteLogger::init(level, simplelog::Config::default(), file).context("install logger")?;
    log::info!("logging to {} at {level}", path.display());
    Ok(())
}
