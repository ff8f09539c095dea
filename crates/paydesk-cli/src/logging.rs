// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Tracing setup. The dashboard owns the terminal, so events go to the
//! configured log file; `--check` runs log to stderr instead.

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 5] = [
    "paydesk",
    "paydesk_api",
    "paydesk_app",
    "paydesk_tui",
    "paydesk_testkit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Discard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub target: LogTarget,
}

impl LogConfig {
    /// Each `-v` raises the configured level one step, capped at trace.
    pub fn new(level: &str, verbosity: u8, target: LogTarget) -> Self {
        Self {
            level: raise_level(level, verbosity).to_owned(),
            target,
        }
    }
}

fn raise_level(level: &str, verbosity: u8) -> &'static str {
    const ORDER: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let start = ORDER
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(level))
        .unwrap_or(2);
    ORDER[(start + usize::from(verbosity)).min(ORDER.len() - 1)]
}

/// Our crates log at the requested level, dependencies stay at warn.
/// `RUST_LOG` replaces the whole directive when set.
fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)))
}

fn directive(level: &str) -> String {
    let mut directive = String::from("warn");
    for name in CRATES {
        directive.push_str(&format!(",{name}={level}"));
    }
    directive
}

pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = build_env_filter(&config.level);
    match &config.target {
        LogTarget::Discard => Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .try_init()
            .map_err(|error| anyhow!("install log subscriber: {error}")),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
                .map_err(|error| anyhow!("install log subscriber: {error}"))
        }
    }
}
