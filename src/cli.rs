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


use clap::Parser;
use std::path::PathBuf;

use crate::ssh_config::DEFAULT_MAX_INCLUDE_DEPTH;

#[derive(Parser, Debug)]
#[command(
    name = "sshconf",
    version,
    about = "Parse an SSH client configuration file and print its Host rules",
    long_about = "sshconf reads an SSH-client-style configuration file, follows its Include directives\n(with ~ and trailing-* expansion), and prints the resulting Host rules in file order.\nIt recognizes Host, HostName, User, Include, IdentityFile, IdentityAgent and IdentitiesOnly.",
    after_help = "EXAMPLES:\n  Show parsed rules:        sshconf ~/.ssh/config\n  Show the token stream:    sshconf --tokens ~/.ssh/config\n  Debug include expansion:  sshconf -vv"
)]
pub struct Cli {
    #[arg(help = "Configuration file to parse [default: ~/.ssh/config]")]
    pub file: Option<PathBuf>,

    #[arg(
        long,
        help = "Print the lexer's token stream instead of the parsed rules\nIncludes are not followed in this mode"
    )]
    pub tokens: bool,

    #[arg(
        long,
        env = "SSHCONF_MAX_INCLUDE_DEPTH",
        default_value_t = DEFAULT_MAX_INCLUDE_DEPTH,
        help = "Maximum Include nesting depth"
    )]
    pub max_include_depth: usize,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

impl Cli {
    /// The file to parse: the positional argument, else `~/.ssh/config`
    pub fn config_path(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".ssh").join("config")))
    }
}
