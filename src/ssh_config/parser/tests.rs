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

//! Tests for SSH configuration parser

use super::core::*;
use crate::ssh_config::error::{ConfigError, ErrorKind};
use crate::ssh_config::keyword::Keyword;
use crate::ssh_config::lexer::TokenKind;
use crate::ssh_config::types::Config;
use std::fs;
use std::io::{Cursor, Seek, SeekFrom};
use std::path::Path;
use tempfile::TempDir;

fn parse_str(content: &str) -> Result<Config, ConfigError> {
    ConfigParser::new(ParserOptions::new().with_home(None)).parse(content.as_bytes())
}

fn pairs(config: &Config) -> Vec<Vec<(&str, &str)>> {
    config.iter().map(|rule| rule.pairs()).collect()
}

fn parser_with_home(home: &Path) -> ConfigParser {
    ConfigParser::new(ParserOptions::new().with_home(Some(home.to_path_buf())))
}

#[test]
fn test_parse_single_host() {
    let config = parse_str("Host foo\n  HostName 1.2.3.4\n").unwrap();
    assert_eq!(config.len(), 1);
    assert_eq!(
        pairs(&config),
        vec![vec![("Host", "foo"), ("HostName", "1.2.3.4")]]
    );
}

#[test]
fn test_parse_multiple_hosts_with_comment() {
    let content = "# comment\nHost a\nUser bob\nHost b\nUser alice\n";
    let config = parse_str(content).unwrap();
    assert_eq!(
        pairs(&config),
        vec![
            vec![("Host", "a"), ("User", "bob")],
            vec![("Host", "b"), ("User", "alice")],
        ]
    );
}

#[test]
fn test_rule_count_matches_host_count() {
    let content = r#"
Host one
Host two
    User u
Host three
    IdentityFile ~/.ssh/id_ed25519
    IdentityAgent none
    IdentitiesOnly yes
"#;
    let config = parse_str(content).unwrap();
    let hosts: Vec<_> = config.iter().filter_map(|r| r.host()).collect();
    assert_eq!(hosts, vec!["one", "two", "three"]);
    assert_eq!(config.rules()[0].len(), 1);
    assert_eq!(config.rules()[2].get(Keyword::IdentitiesOnly), Some("yes"));
}

#[test]
fn test_repeated_keywords_are_all_kept() {
    let content = "Host a\n  User first\n  User second\n";
    let config = parse_str(content).unwrap();
    let rule = &config.rules()[0];
    assert_eq!(rule.get(Keyword::User), Some("first"));
    assert_eq!(
        rule.get_all(Keyword::User).collect::<Vec<_>>(),
        vec!["first", "second"]
    );
}

#[test]
fn test_comments_and_whitespace_only_yield_empty_config() {
    assert!(parse_str("").unwrap().is_empty());
    assert!(parse_str("   \n\t\r\n").unwrap().is_empty());
    assert!(parse_str("# one\n   # two\n#three").unwrap().is_empty());
}

#[test]
fn test_comment_between_keyword_lines() {
    let content = "Host a # trailing comment\n# full line\n  User bob\n";
    let config = parse_str(content).unwrap();
    assert_eq!(pairs(&config), vec![vec![("Host", "a"), ("User", "bob")]]);
}

#[test]
fn test_quoted_values_are_unquoted() {
    let content = "Host \"my host\"\n  IdentityFile \"/keys/with space\"\n  User \"\"\n";
    let config = parse_str(content).unwrap();
    assert_eq!(
        pairs(&config),
        vec![vec![
            ("Host", "my host"),
            ("IdentityFile", "/keys/with space"),
            ("User", ""),
        ]]
    );
}

#[test]
fn test_unterminated_quote_becomes_final_value() {
    let content = "Host a\n  User \"bob\n";
    let config = parse_str(content).unwrap();
    assert_eq!(config.rules()[0].get(Keyword::User), Some("bob\n"));
}

#[test]
fn test_unquote() {
    assert_eq!(unquote("plain".to_string()), "plain");
    assert_eq!(unquote("\"quoted\"".to_string()), "quoted");
    assert_eq!(unquote("\"open".to_string()), "open");
    assert_eq!(unquote("\"".to_string()), "");
    assert_eq!(unquote("in\"side\"".to_string()), "in\"side\"");
}

#[test]
fn test_attribute_before_first_host() {
    let err = parse_str("User bob\nHost a\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    match err {
        ConfigError::AttributeBeforeHost {
            keyword,
            line,
            offset,
            ..
        } => {
            assert_eq!(keyword, Keyword::User);
            assert_eq!(line, 1);
            assert_eq!(offset, 0);
        }
        other => panic!("expected AttributeBeforeHost, got {other:?}"),
    }
}

#[test]
fn test_identifier_where_keyword_expected() {
    let err = parse_str("Host a\n  Port 22\n").unwrap_err();
    match err {
        ConfigError::UnexpectedToken {
            expected,
            found,
            line,
            offset,
            ..
        } => {
            assert_eq!(expected, TokenKind::Keyword);
            assert_eq!(found, TokenKind::Identifier);
            assert_eq!(line, 2);
            assert_eq!(offset, 9);
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn test_missing_value() {
    let cases = [
        ("Host User bob\n", TokenKind::Keyword),
        ("Host # nothing\n", TokenKind::Comment),
        ("Host a\n  User", TokenKind::End),
    ];

    for (content, found_kind) in cases {
        match parse_str(content) {
            Err(ConfigError::UnexpectedToken {
                expected, found, ..
            }) => {
                assert_eq!(expected, TokenKind::Identifier, "input: {content:?}");
                assert_eq!(found, found_kind, "input: {content:?}");
            }
            other => panic!("input {content:?}: expected UnexpectedToken, got {other:?}"),
        }
    }
}

#[test]
fn test_error_message_names_origin_and_position() {
    let err = parse_str("Host a\nbogus\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "<stream>:2: expected keyword but got value at offset 7"
    );
}

#[test]
fn test_parse_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config");
    fs::write(&path, "Host a\n  User bob\nHost b\n  HostName b.example\n").unwrap();

    let parser = ConfigParser::new(ParserOptions::new().with_home(None));
    let first = parser.parse_file(&path).unwrap();
    let second = parser.parse_file(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_from_start_rewinds() {
    let mut cursor = Cursor::new(b"Host a\n  User bob\n".to_vec());
    cursor.seek(SeekFrom::End(0)).unwrap();

    let parser = ConfigParser::new(ParserOptions::new().with_home(None));
    let config = parser.parse_from_start(&mut cursor).unwrap();
    assert_eq!(pairs(&config), vec![vec![("Host", "a"), ("User", "bob")]]);
}

#[test]
fn test_display_output_parses_back_to_same_config() {
    let inputs = [
        "Host a\n  User bob\n  IdentityFile \"/k/a b\"\nHost c\n",
        "Host \"User\"\n  HostName \"Include\"\n",
        "Host \"#x\"\n  User \"# not a comment\"\n",
        "Host \"\"\n  IdentityAgent a#b\n",
    ];

    for content in inputs {
        let config = parse_str(content).unwrap();
        let rendered = config.to_string();
        let reparsed = parse_str(&rendered)
            .unwrap_or_else(|e| panic!("rendered {rendered:?} failed to parse: {e}"));
        assert_eq!(config, reparsed, "input: {content:?}");
    }
}

#[test]
fn test_from_str() {
    let config: Config = "Host x\n  User y\n".parse().unwrap();
    assert_eq!(config.rules()[0].get(Keyword::User), Some("y"));
}

#[test]
fn test_include_splices_rules_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let extra = temp_dir.path().join("extra.conf");
    fs::write(&extra, "Host included\n  User inc\n").unwrap();

    let content = format!(
        "Host before\n  User b\nInclude {}\nHost after\n  User a\n",
        extra.display()
    );
    let config = parse_str(&content).unwrap();

    let hosts: Vec<_> = config.iter().filter_map(|r| r.host()).collect();
    assert_eq!(hosts, vec!["before", "included", "after"]);
    // Include itself is not recorded as an attribute
    assert_eq!(config.rules()[0].pairs(), vec![("Host", "before"), ("User", "b")]);
}

#[test]
fn test_include_glob_from_home() {
    let home = TempDir::new().unwrap();
    let conf_d = home.path().join(".ssh").join("conf.d");
    fs::create_dir_all(&conf_d).unwrap();
    fs::write(conf_d.join("y.conf"), "Host y\n  HostName 10.0.0.2\n").unwrap();
    fs::write(conf_d.join("x.conf"), "Host x\n  HostName 10.0.0.1\n").unwrap();

    let content = "Host first\nInclude ~/.ssh/conf.d/*\n";
    let config = parser_with_home(home.path())
        .parse(content.as_bytes())
        .unwrap();

    let hosts: Vec<_> = config.iter().filter_map(|r| r.host()).collect();
    assert_eq!(hosts, vec!["first", "x", "y"]);
    assert_eq!(config.rules()[2].get(Keyword::HostName), Some("10.0.0.2"));
}

#[test]
fn test_attribute_after_include_joins_last_rule() {
    let temp_dir = TempDir::new().unwrap();
    let extra = temp_dir.path().join("extra.conf");
    fs::write(&extra, "Host included\n").unwrap();

    let content = format!("Host a\nInclude {}\nUser late\n", extra.display());
    let config = parse_str(&content).unwrap();

    assert_eq!(config.rules()[0].pairs(), vec![("Host", "a")]);
    assert_eq!(
        config.rules()[1].pairs(),
        vec![("Host", "included"), ("User", "late")]
    );
}

#[test]
fn test_include_of_comment_only_file_before_host() {
    let temp_dir = TempDir::new().unwrap();
    let extra = temp_dir.path().join("empty.conf");
    fs::write(&extra, "# nothing here\n").unwrap();

    let ok = format!("Include {}\nHost a\n", extra.display());
    assert_eq!(parse_str(&ok).unwrap().len(), 1);

    // Still no current rule after an include that added none
    let bad = format!("Include {}\nUser bob\n", extra.display());
    assert!(matches!(
        parse_str(&bad),
        Err(ConfigError::AttributeBeforeHost { .. })
    ));
}

#[test]
fn test_include_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nonexistent");
    let content = format!("Host a\nInclude {}\nHost b\n", missing.display());

    let err = parse_str(&content).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, ConfigError::IncludeOpen { ref path, .. } if *path == missing));
}

#[test]
fn test_include_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let content = format!("Include {}/nope/*\n", temp_dir.path().display());

    let err = parse_str(&content).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DirectoryAccess);
}

#[test]
fn test_include_tilde_without_home() {
    let err = parse_str("Include ~/.ssh/extra\n").unwrap_err();
    assert!(matches!(err, ConfigError::HomeDirUnavailable { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_syntax_error_in_included_file_names_that_file() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.conf");
    fs::write(&broken, "IdentityFile ~/.ssh/id\n").unwrap();

    let content = format!("Host a\nInclude {}\n", broken.display());
    match parse_str(&content) {
        Err(ConfigError::AttributeBeforeHost { origin, .. }) => {
            assert_eq!(origin, broken.display().to_string());
        }
        other => panic!("expected AttributeBeforeHost, got {other:?}"),
    }
}

#[test]
fn test_self_include_is_a_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config");
    fs::write(&path, format!("Host a\nInclude {}\n", path.display())).unwrap();

    let parser = ConfigParser::new(ParserOptions::new().with_home(None));
    let err = parser.parse_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::IncludeCycle { .. }));
}

#[test]
fn test_mutual_include_cycle_from_stream() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a.conf");
    let b = temp_dir.path().join("b.conf");
    fs::write(&a, format!("Host a\nInclude {}\n", b.display())).unwrap();
    fs::write(&b, format!("Host b\nInclude {}\n", a.display())).unwrap();

    let err = parse_str(&format!("Include {}\n", a.display())).unwrap_err();
    assert!(matches!(err, ConfigError::IncludeCycle { ref path, .. } if *path == a));
}

#[test]
fn test_same_file_included_twice_is_not_a_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let shared = temp_dir.path().join("shared.conf");
    fs::write(&shared, "Host shared\n").unwrap();

    let content = format!(
        "Include {0}\nHost middle\nInclude {0}\n",
        shared.display()
    );
    let config = parse_str(&content).unwrap();
    let hosts: Vec<_> = config.iter().filter_map(|r| r.host()).collect();
    assert_eq!(hosts, vec!["shared", "middle", "shared"]);
}

#[test]
fn test_include_depth_limit() {
    let temp_dir = TempDir::new().unwrap();

    // level0 includes level1 includes level2 ...
    for i in 0..5 {
        let next = temp_dir.path().join(format!("level{}.conf", i + 1));
        fs::write(
            temp_dir.path().join(format!("level{i}.conf")),
            format!("Host h{i}\nInclude {}\n", next.display()),
        )
        .unwrap();
    }
    fs::write(temp_dir.path().join("level5.conf"), "Host h5\n").unwrap();

    let root = temp_dir.path().join("level0.conf");

    let deep = ConfigParser::new(
        ParserOptions::new()
            .with_home(None)
            .with_max_include_depth(5),
    );
    assert_eq!(deep.parse_file(&root).unwrap().len(), 6);

    let shallow = ConfigParser::new(
        ParserOptions::new()
            .with_home(None)
            .with_max_include_depth(3),
    );
    let err = shallow.parse_file(&root).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::IncludeDepthExceeded { limit: 3, .. }
    ));
}

#[test]
fn test_quoted_include_path() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("with space");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("x.conf"), "Host spaced\n").unwrap();

    let content = format!("Include \"{}/*\"\n", dir.display());
    let config = parse_str(&content).unwrap();
    assert_eq!(config.rules()[0].host(), Some("spaced"));
}
