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

//! Core SSH configuration parsing functionality
//!
//! The parser pulls tokens from the lexer and drives a small state machine:
//! a keyword must be followed by a value, `Host` opens a new rule, other
//! keywords add to the current rule, and `Include` parses every file its path
//! expands to and splices their rules in at that point.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ssh_config::error::{ConfigError, Result};
use crate::ssh_config::include::{IncludeContext, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::ssh_config::keyword::Keyword;
use crate::ssh_config::lexer::{LexError, Lexer, Token, TokenKind};
use crate::ssh_config::path::PathExpander;
use crate::ssh_config::types::{Attribute, Config, Rule};

/// Origin reported for input that does not come from a named file
const STREAM_ORIGIN: &str = "<stream>";

/// Settings for a [`ConfigParser`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Home directory for `~` expansion in Include paths
    pub home: Option<PathBuf>,
    /// Maximum Include nesting depth
    pub max_include_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            home: dirs::home_dir(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }
}

/// Parser for SSH configuration input
///
/// A parser holds no per-parse state; each call builds its own include
/// chain, so one parser can be reused for any number of inputs.
#[derive(Debug, Clone)]
pub struct ConfigParser {
    expander: PathExpander,
    max_include_depth: usize,
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl ConfigParser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            expander: PathExpander::new(options.home),
            max_include_depth: options.max_include_depth,
        }
    }

    /// Parse a byte stream from its current position to its end
    pub fn parse<R: Read>(&self, reader: R) -> Result<Config> {
        let mut context = IncludeContext::new(self.max_include_depth);
        self.parse_stream(BufReader::new(reader), STREAM_ORIGIN, &mut context)
    }

    /// Rewind a seekable stream, then parse all of it
    pub fn parse_from_start<R: Read + Seek>(&self, mut reader: R) -> Result<Config> {
        reader.rewind().map_err(|source| ConfigError::Read {
            origin: STREAM_ORIGIN.to_string(),
            source,
        })?;
        self.parse(reader)
    }

    /// Parse a configuration file
    ///
    /// The file becomes the root of the include chain, so an Include that
    /// leads back to it is reported as a cycle.
    pub fn parse_file(&self, path: &Path) -> Result<Config> {
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            origin: origin.clone(),
            source,
        })?;

        let mut context = IncludeContext::with_root(self.max_include_depth, path);
        self.parse_stream(BufReader::new(file), &origin, &mut context)
    }

    fn parse_stream<R: BufRead>(
        &self,
        reader: R,
        origin: &str,
        context: &mut IncludeContext,
    ) -> Result<Config> {
        let mut lexer = Lexer::new(reader);
        let mut config = Config::new();

        loop {
            let token = next_token(&mut lexer, origin)?;
            match token.kind {
                TokenKind::End => break,
                TokenKind::Comment => continue,
                TokenKind::Keyword | TokenKind::Identifier => {}
            }

            let Some(keyword) = token.keyword() else {
                return Err(unexpected(origin, &token, TokenKind::Keyword));
            };

            let value_token = next_token(&mut lexer, origin)?;
            if value_token.kind != TokenKind::Identifier {
                return Err(unexpected(origin, &value_token, TokenKind::Identifier));
            }
            let value = unquote(value_token.into_text().unwrap_or_default());

            match keyword {
                Keyword::Include => {
                    self.include(&value, context, &mut config)?;
                }
                Keyword::Host => {
                    let mut rule = Rule::new();
                    rule.push(Attribute::new(keyword, value));
                    config.push_rule(rule);
                }
                _ => {
                    let Some(rule) = config.current_rule_mut() else {
                        return Err(ConfigError::AttributeBeforeHost {
                            origin: origin.to_string(),
                            line: token.line,
                            offset: token.span.start,
                            keyword,
                        });
                    };
                    rule.push(Attribute::new(keyword, value));
                }
            }
        }

        tracing::debug!(origin, rules = config.len(), "parsed configuration");
        Ok(config)
    }

    /// Parse every file `pattern` expands to and append their rules to `config`
    fn include(
        &self,
        pattern: &str,
        context: &mut IncludeContext,
        config: &mut Config,
    ) -> Result<()> {
        let paths = self.expander.expand(pattern)?;
        tracing::debug!("Include '{}' expanded to {} file(s)", pattern, paths.len());

        for path in paths {
            context.enter(&path)?;
            let included = self.parse_included(&path, context);
            context.exit();

            config.append(included?);
        }

        Ok(())
    }

    fn parse_included(&self, path: &Path, context: &mut IncludeContext) -> Result<Config> {
        let file = File::open(path).map_err(|source| ConfigError::IncludeOpen {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Including {}", path.display());
        self.parse_stream(BufReader::new(file), &path.display().to_string(), context)
    }
}

fn next_token<R: BufRead>(lexer: &mut Lexer<R>, origin: &str) -> Result<Token> {
    lexer.next_token().map_err(|e| match e {
        LexError::Io(source) => ConfigError::Read {
            origin: origin.to_string(),
            source,
        },
        LexError::InvalidUtf8 { offset } => ConfigError::InvalidUtf8 {
            origin: origin.to_string(),
            offset,
        },
    })
}

fn unexpected(origin: &str, token: &Token, expected: TokenKind) -> ConfigError {
    ConfigError::UnexpectedToken {
        origin: origin.to_string(),
        line: token.line,
        offset: token.span.start,
        expected,
        found: token.kind,
    }
}

/// Strip the surrounding quotes of a quoted value
///
/// An unterminated value (`"abc` running to end of input) loses only its
/// opening quote.
pub(super) fn unquote(value: String) -> String {
    let Some(inner) = value.strip_prefix('"') else {
        return value;
    };
    inner.strip_suffix('"').unwrap_or(inner).to_string()
}

/// Parse a byte stream with default options
pub fn parse<R: Read>(reader: R) -> Result<Config> {
    ConfigParser::default().parse(reader)
}

/// Rewind and parse a seekable stream with default options
pub fn parse_from_start<R: Read + Seek>(reader: R) -> Result<Config> {
    ConfigParser::default().parse_from_start(reader)
}

/// Parse a configuration file with default options
pub fn parse_file(path: &Path) -> Result<Config> {
    ConfigParser::default().parse_file(path)
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s.as_bytes())
    }
}
