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

//! SSH configuration parsing
//!
//! This module turns SSH-client-style configuration text into an ordered list
//! of Host rules. The pipeline has three parts:
//! - `lexer`: splits input into keyword, value and comment tokens
//! - `path`: expands `~` and trailing-`*` Include paths into file lists
//! - `parser`: builds the rule list and splices in included files
//!
//! ```rust
//! use sshconf::ssh_config::{Config, Keyword};
//!
//! let config: Config = "Host web\n  HostName 10.0.0.5\n  User deploy\n".parse().unwrap();
//! assert_eq!(config.len(), 1);
//! assert_eq!(config.rules()[0].get(Keyword::User), Some("deploy"));
//! ```

mod error;
mod include;
mod keyword;
pub mod lexer;
mod parser;
mod path;
mod types;

pub use error::{ConfigError, ErrorKind, Result};
pub use include::DEFAULT_MAX_INCLUDE_DEPTH;
pub use keyword::{Keyword, UnknownKeyword};
pub use lexer::{tokenize, LexError, Lexer, Token, TokenKind};
pub use parser::{parse, parse_file, parse_from_start, ConfigParser, ParserOptions};
pub use path::PathExpander;
pub use types::{Attribute, Config, Rule};
