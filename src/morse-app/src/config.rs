// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! `morse-rs.toml` loading.
//!
//! One file serves both programs; each reads only its own `[morse-tx]` or
//! `[morse-rx]` table, so a station can keep its transmitter and receiver
//! settings side by side.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "morse-rs.toml";
const CONFIG_DIR_NAME: &str = "morse-rs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{program}: cannot read {}: {reason}", .path.display())]
    Read {
        program: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("{program}: cannot parse {}: {reason}", .path.display())]
    Parse {
        program: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("{program}: {} has no [{program}] section", .path.display())]
    MissingSection { program: &'static str, path: PathBuf },
}

/// Places a `morse-rs.toml` is looked for, in order: working directory,
/// user config dir, `/etc`.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from("/etc").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    paths
}

/// Read `path` and deserialize the `[program]` table, if there is one.
fn load_program_section<T: DeserializeOwned>(
    path: &Path,
    program: &'static str,
) -> Result<Option<T>, ConfigError> {
    let parse_error = |reason: String| ConfigError::Parse {
        program,
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        program,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

    let Some(section) = table.get(program) else {
        return Ok(None);
    };

    // Round-trip the table through text so `#[serde(default)]` fills gaps.
    let section_toml = toml::to_string(section).map_err(|e| parse_error(e.to_string()))?;
    toml::from_str::<T>(&section_toml)
        .map(Some)
        .map_err(|e| parse_error(e.to_string()))
}

/// A program's settings, stored as one table of `morse-rs.toml`.
pub trait ConfigFile: Sized + Default + DeserializeOwned {
    /// Table name, which is also the program name (`"morse-tx"`, `"morse-rx"`).
    fn section_key() -> &'static str;

    /// Load from an explicit `--config` path. The table must be present.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let program = Self::section_key();
        load_program_section::<Self>(path, program)?.ok_or_else(|| ConfigError::MissingSection {
            program,
            path: path.to_path_buf(),
        })
    }

    /// Load from the first default location whose file has this program's
    /// table. Falls back to built-in defaults when none does.
    fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in config_search_paths() {
            if path.exists() {
                if let Some(cfg) = load_program_section::<Self>(&path, Self::section_key())? {
                    return Ok((cfg, Some(path)));
                }
            }
        }
        Ok((Self::default(), None))
    }
}
