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

//! Tokenizer for SSH configuration input
//!
//! The lexer pulls one token at a time from any [`BufRead`] source. Bytes are
//! accumulated into an owned buffer while they are classified, so the input is
//! read exactly once and never needs to support seeking.
//!
//! Token rules:
//! - Leading whitespace (space, tab, CR, LF) is skipped.
//! - `#` starts a comment running up to (not including) the next `\n`. A `\r`
//!   before it is part of the comment text.
//! - `"` starts a quoted span that ends at the next `"`, or at end of input if
//!   the quote is never closed. The quote bytes are part of the token text.
//! - Anything else is a bare word: a run of non-whitespace bytes.

use std::fmt;
use std::io::{self, BufRead};
use std::ops::Range;

use thiserror::Error;

use super::keyword::Keyword;

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Comment,
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "value",
            TokenKind::Comment => "comment",
            TokenKind::End => "end of input",
        };
        f.write_str(name)
    }
}

/// A single lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw token text as read from the input. `None` only for [`TokenKind::End`].
    pub text: Option<String>,
    /// Byte range of the token within the input
    pub span: Range<usize>,
    /// 1-based line the token starts on
    pub line: usize,
}

impl Token {
    fn end(offset: usize, line: usize) -> Self {
        Self {
            kind: TokenKind::End,
            text: None,
            span: offset..offset,
            line,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn into_text(self) -> Option<String> {
        self.text
    }

    /// The keyword this token spells, if it is a keyword token
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => self.text().and_then(Keyword::lookup),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.span.start, self.kind)?;
        if let Some(text) = self.text() {
            write!(f, " {text:?}")?;
        }
        Ok(())
    }
}

/// Errors raised while reading tokens
#[derive(Debug, Error)]
pub enum LexError {
    #[error("I/O error while reading input: {0}")]
    Io(#[from] io::Error),

    #[error("invalid UTF-8 in token starting at offset {offset}")]
    InvalidUtf8 { offset: usize },
}

pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn classify(text: &str) -> TokenKind {
    if Keyword::lookup(text).is_some() {
        TokenKind::Keyword
    } else if text.starts_with('#') {
        TokenKind::Comment
    } else {
        TokenKind::Identifier
    }
}

/// Pull-based tokenizer over a buffered byte source
pub struct Lexer<R> {
    reader: R,
    offset: usize,
    line: usize,
    finished: bool,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            line: 1,
            finished: false,
        }
    }

    /// Number of bytes consumed so far
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current 1-based line
    pub fn line(&self) -> usize {
        self.line
    }

    fn peek(&mut self) -> Result<Option<u8>, LexError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(LexError::Io(e)),
            }
        }
    }

    /// Consume one byte that `peek` has already produced
    fn advance(&mut self, byte: u8) {
        self.reader.consume(1);
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        while let Some(byte) = self.peek()? {
            if !is_whitespace(byte) {
                break;
            }
            self.advance(byte);
        }
        Ok(())
    }

    /// Read the next token. Once input is exhausted every call returns an `End` token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace()?;

        let start = self.offset;
        let line = self.line;
        let Some(first) = self.peek()? else {
            return Ok(Token::end(start, line));
        };

        let mut buf = vec![first];
        self.advance(first);

        match first {
            b'#' => {
                while let Some(byte) = self.peek()? {
                    if byte == b'\n' {
                        break;
                    }
                    buf.push(byte);
                    self.advance(byte);
                }
            }
            b'"' => {
                // No escapes: the next quote always closes the span
                while let Some(byte) = self.peek()? {
                    buf.push(byte);
                    self.advance(byte);
                    if byte == b'"' {
                        break;
                    }
                }
            }
            _ => {
                while let Some(byte) = self.peek()? {
                    if is_whitespace(byte) {
                        break;
                    }
                    buf.push(byte);
                    self.advance(byte);
                }
            }
        }

        let text = String::from_utf8(buf).map_err(|e| LexError::InvalidUtf8 {
            offset: start + e.utf8_error().valid_up_to(),
        })?;
        let kind = classify(&text);

        tracing::trace!(line, offset = start, %kind, text = %text, "token");

        Ok(Token {
            kind,
            text: Some(text),
            span: start..self.offset,
            line,
        })
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, LexError>;

    /// Yields every token before `End`; the `End` token itself is not yielded
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_end() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Tokenize an in-memory string, excluding the trailing `End` token
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input.as_bytes()).collect()
}
