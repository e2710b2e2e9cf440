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


use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use sshconf::{
    cli::Cli,
    ssh_config::{ConfigParser, Lexer, ParserOptions},
    utils::init_logging,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli
        .config_path()
        .context("No configuration file given and the home directory is unknown")?;

    if cli.tokens {
        print_tokens(&path)
    } else {
        print_config(&path, cli.max_include_depth)
    }
}

fn print_config(path: &Path, max_include_depth: usize) -> Result<()> {
    let parser = ConfigParser::new(ParserOptions::new().with_max_include_depth(max_include_depth));
    let config = parser
        .parse_file(path)
        .with_context(|| format!("Failed to parse SSH config file: {}", path.display()))?;

    tracing::info!("{} rule(s) in {}", config.len(), path.display());
    print!("{config}");
    Ok(())
}

fn print_tokens(path: &Path) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open SSH config file: {}", path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for token in Lexer::new(BufReader::new(file)) {
        let token = token.with_context(|| format!("Failed to tokenize {}", path.display()))?;
        writeln!(out, "{token}")?;
    }
    Ok(())
}
