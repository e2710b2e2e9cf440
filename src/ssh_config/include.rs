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

//! Include chain tracking
//!
//! Every file being parsed is pushed onto the chain while its contents are
//! processed and popped when it is done. Including a file that is already on
//! the chain is a cycle. The same file may still be included several times
//! from unrelated places.

use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};

/// Default maximum include nesting depth
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// State shared by one top-level parse and all of its nested includes
#[derive(Debug, Clone)]
pub(crate) struct IncludeContext {
    /// Canonical paths of the files currently being parsed, outermost first
    chain: Vec<PathBuf>,
    /// Whether `chain[0]` is a root file rather than an include
    has_root: bool,
    max_depth: usize,
}

impl IncludeContext {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            chain: Vec::with_capacity(4),
            has_root: false,
            max_depth,
        }
    }

    /// Register the root file so that including it again is reported as a cycle
    pub(crate) fn with_root(max_depth: usize, root: &Path) -> Self {
        let mut context = Self::new(max_depth);
        context.chain.push(canonical(root));
        context.has_root = true;
        context
    }

    /// Number of nested includes entered, not counting a root file
    pub(crate) fn depth(&self) -> usize {
        self.chain.len() - usize::from(self.has_root)
    }

    /// Enter an included file
    pub(crate) fn enter(&mut self, path: &Path) -> Result<()> {
        if self.depth() >= self.max_depth {
            return Err(ConfigError::IncludeDepthExceeded {
                path: path.to_path_buf(),
                limit: self.max_depth,
            });
        }

        let canonical = canonical(path);
        if self.chain.contains(&canonical) {
            return Err(ConfigError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }

        self.chain.push(canonical);
        Ok(())
    }

    /// Leave the most recently entered file
    pub(crate) fn exit(&mut self) {
        if self.depth() > 0 {
            self.chain.pop();
        }
    }
}

/// Canonicalize when possible; a path that cannot be resolved stays as written
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|e| {
        tracing::debug!("Failed to canonicalize {}: {}", path.display(), e);
        path.to_path_buf()
    })
}
