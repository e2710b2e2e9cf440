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

//! The fixed set of directive names recognized by the configuration format

use std::fmt;
use std::str::FromStr;

/// A recognized directive name
///
/// Matching is exact and case-sensitive: `hostname` is an ordinary value,
/// only `HostName` is a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    User,
    Host,
    Include,
    HostName,
    IdentityFile,
    IdentityAgent,
    IdentitiesOnly,
}

impl Keyword {
    /// Every keyword, in table order
    pub const ALL: [Keyword; 7] = [
        Keyword::User,
        Keyword::Host,
        Keyword::Include,
        Keyword::HostName,
        Keyword::IdentityFile,
        Keyword::IdentityAgent,
        Keyword::IdentitiesOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::User => "User",
            Keyword::Host => "Host",
            Keyword::Include => "Include",
            Keyword::HostName => "HostName",
            Keyword::IdentityFile => "IdentityFile",
            Keyword::IdentityAgent => "IdentityAgent",
            Keyword::IdentitiesOnly => "IdentitiesOnly",
        }
    }

    /// Look up a keyword by its exact spelling
    pub fn lookup(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == text)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the recognized keywords
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown keyword '{0}'")]
pub struct UnknownKeyword(pub String);

impl FromStr for Keyword {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}
