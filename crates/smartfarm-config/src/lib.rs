// SPDX-FileCopyrightText: 2026 SmartFarm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the SmartFarm monitoring platform.
//!
//! TOML files plus `SMARTFARM_*` environment overrides, strict key checking
//! (`deny_unknown_fields`), and miette diagnostics with typo suggestions.
//!
//! ```no_run
//! use smartfarm_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("database: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SmartfarmConfig;

/// Load the layered configuration and validate it.
pub fn load_and_validate() -> Result<SmartfarmConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load an explicit configuration file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<SmartfarmConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || read_sources([path]))
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<SmartfarmConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<SmartfarmConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<SmartfarmConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// File contents of every config layer that exists, for error spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut paths = vec![Path::new(loader::SYSTEM_CONFIG).to_path_buf()];
    paths.extend(loader::user_config_path());
    if let Ok(dir) = std::env::current_dir() {
        paths.push(dir.join(loader::LOCAL_CONFIG));
    }
    read_sources(paths)
}

fn read_sources<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Vec<(String, String)> {
    paths
        .into_iter()
        .filter_map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
