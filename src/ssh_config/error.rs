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

//! Error types for SSH configuration parsing and include expansion

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::keyword::Keyword;
use super::lexer::TokenKind;

/// Coarse category of a [`ConfigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not follow the grammar
    Syntax,
    /// The environment or an included file is unusable
    Configuration,
    /// A glob-style include names a directory that cannot be listed
    DirectoryAccess,
}

/// Errors that can occur while parsing a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A token of the wrong kind appeared
    #[error("{origin}:{line}: expected {expected} but got {found} at offset {offset}")]
    UnexpectedToken {
        origin: String,
        line: usize,
        offset: usize,
        expected: TokenKind,
        found: TokenKind,
    },

    /// A non-Host keyword appeared before any Host block was opened
    #[error("{origin}:{line}: '{keyword}' at offset {offset} appears before the first Host block")]
    AttributeBeforeHost {
        origin: String,
        line: usize,
        offset: usize,
        keyword: Keyword,
    },

    #[error("{origin}: invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { origin: String, offset: usize },

    /// `~` expansion was requested but no home directory is known
    #[error("cannot expand '{path}': home directory is not set")]
    HomeDirUnavailable { path: String },

    #[error("cannot open included file {}: {source}", path.display())]
    IncludeOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read directory {}: {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("include cycle detected: {} is already being parsed", path.display())]
    IncludeCycle { path: PathBuf },

    #[error("maximum include depth ({limit}) exceeded while including {}", path.display())]
    IncludeDepthExceeded { path: PathBuf, limit: usize },

    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::UnexpectedToken { .. }
            | ConfigError::AttributeBeforeHost { .. }
            | ConfigError::InvalidUtf8 { .. } => ErrorKind::Syntax,
            ConfigError::DirectoryAccess { .. } => ErrorKind::DirectoryAccess,
            ConfigError::HomeDirUnavailable { .. }
            | ConfigError::IncludeOpen { .. }
            | ConfigError::IncludeCycle { .. }
            | ConfigError::IncludeDepthExceeded { .. }
            | ConfigError::Read { .. } => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
