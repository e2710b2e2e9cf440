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

//! Core data structures for parsed SSH configuration

use std::fmt;
use std::slice;

use super::keyword::Keyword;
use super::lexer::is_whitespace;

/// One keyword/value pair inside a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub keyword: Keyword,
    pub value: String,
}

impl Attribute {
    pub fn new(keyword: Keyword, value: impl Into<String>) -> Self {
        Self {
            keyword,
            value: value.into(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.keyword.as_str()
    }

    /// Whether the value must be quoted to be read back as a single value
    fn needs_quotes(&self) -> bool {
        let value = self.value.as_str();
        value.is_empty()
            || value.bytes().any(is_whitespace)
            || value.starts_with('#')
            || Keyword::lookup(value).is_some()
    }
}

/// Renders `Keyword value`, quoting the value when it is empty, contains
/// whitespace, starts with `#` or spells a keyword.
///
/// The format has no escapes, so a value that starts with `"`, or that needs
/// quoting and contains a `"`, is written as-is and does not read back the same.
/// The parser never produces a value starting with `"`.
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_quotes() {
            write!(f, "{} \"{}\"", self.keyword, self.value)
        } else {
            write!(f, "{} {}", self.keyword, self.value)
        }
    }
}

/// A Host block: the `Host` attribute followed by every attribute up to the next block
///
/// Attributes keep their source order and repeated keywords are all kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    attributes: Vec<Attribute>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Value of the Host attribute that opened this rule
    pub fn host(&self) -> Option<&str> {
        self.get(Keyword::Host)
    }

    /// First value recorded for `keyword`
    pub fn get(&self, keyword: Keyword) -> Option<&str> {
        self.get_all(keyword).next()
    }

    /// Every value recorded for `keyword`, in source order
    pub fn get_all(&self, keyword: Keyword) -> impl Iterator<Item = &str> + '_ {
        self.attributes
            .iter()
            .filter(move |a| a.keyword == keyword)
            .map(|a| a.value.as_str())
    }

    /// Attributes as `(key, value)` string pairs
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.attributes
            .iter()
            .map(|a| (a.key(), a.value.as_str()))
            .collect()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attribute) in self.attributes.iter().enumerate() {
            if i == 0 {
                writeln!(f, "{attribute}")?;
            } else {
                writeln!(f, "    {attribute}")?;
            }
        }
        Ok(())
    }
}

/// A parsed configuration: Host rules in source order, includes spliced in place
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    rules: Vec<Rule>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Open a new rule and make it current
    pub(crate) fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// The rule that new attributes are added to
    pub(crate) fn current_rule_mut(&mut self) -> Option<&mut Rule> {
        self.rules.last_mut()
    }

    /// Move every rule of `other` onto the end of this config
    pub(crate) fn append(&mut self, other: Config) {
        self.rules.extend(other.rules);
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = &'a Rule;
    type IntoIter = slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl IntoIterator for Config {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
