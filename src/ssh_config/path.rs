// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Expansion of Include paths
//!
//! An include path may start with `~`, which is replaced by the home directory,
//! and may end with `*`, which lists every entry of the directory named by the
//! rest of the path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};

/// Turns one include path into the concrete list of files it names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    /// Create an expander with an explicit home directory (`None` disables `~`)
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    /// Create an expander using the current user's home directory
    pub fn from_env() -> Self {
        Self::new(dirs::home_dir())
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Expand `path` into an ordered list of paths
    ///
    /// Without a trailing `*` the result is the single (home-expanded) path.
    /// With one, the result is every entry of the directory, sorted by name.
    /// A separator is inserted between directory and entry name only when the
    /// directory does not already end with one, so `conf.d/*` and `conf.d*`
    /// name the same files.
    pub fn expand(&self, path: &str) -> Result<Vec<PathBuf>> {
        let Some(dir) = path.strip_suffix('*') else {
            return Ok(vec![self.expand_home(path)?]);
        };

        let dir = self.expand_home(dir)?;
        let entries = std::fs::read_dir(&dir).map_err(|source| ConfigError::DirectoryAccess {
            path: dir.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::DirectoryAccess {
                path: dir.clone(),
                source,
            })?;
            names.push(entry.file_name());
        }
        names.sort();

        if names.is_empty() {
            tracing::warn!("Include pattern '{}' matched no files", path);
        }

        let files: Vec<PathBuf> = names.into_iter().map(|name| dir.join(name)).collect();
        tracing::debug!(pattern = %path, count = files.len(), "expanded include pattern");
        Ok(files)
    }

    /// Replace a leading `~` with the home directory
    ///
    /// Only the single `~` byte is replaced: `~/x` becomes `$HOME/x` and
    /// `~x` becomes `$HOMEx`.
    fn expand_home(&self, path: &str) -> Result<PathBuf> {
        let Some(rest) = path.strip_prefix('~') else {
            return Ok(PathBuf::from(path));
        };

        let home = self
            .home
            .as_ref()
            .ok_or_else(|| ConfigError::HomeDirUnavailable {
                path: path.to_string(),
            })?;

        let mut expanded = OsString::from(home.as_os_str());
        expanded.push(rest);
        Ok(PathBuf::from(expanded))
    }
}
