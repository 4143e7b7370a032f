// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `/etc/smartfarm/smartfarm.toml`, then
//! `~/.config/smartfarm/smartfarm.toml`, then `./smartfarm.toml`, with
//! `SMARTFARM_*` environment variables on top.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SmartfarmConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/smartfarm/smartfarm.toml";
pub(crate) const LOCAL_CONFIG: &str = "smartfarm.toml";

/// Config sections that environment variables can address.
const SECTIONS: &[&str] = &["app", "storage", "ingestion", "reports"];

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("smartfarm").join("smartfarm.toml"))
}

/// The full layered figment, before extraction.
///
/// Merge order (later overrides earlier): compiled defaults, system file,
/// user file, local file, `SMARTFARM_*` environment variables.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(SmartfarmConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG)).merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SmartfarmConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over compiled defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<SmartfarmConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartfarmConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SmartfarmConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SmartfarmConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `SMARTFARM_STORAGE_DATABASE_PATH` maps to `storage.database_path`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// key names keep their own underscores.
fn env_provider() -> Env {
    Env::prefixed("SMARTFARM_").map(|key| {
        // Env keys keep the case they were exported with.
        let key = key.as_str().to_ascii_lowercase();
        SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key)
            .into()
    })
}
