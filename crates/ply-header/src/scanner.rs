//! Header scanner — turns header text into a forward-only token stream.
//!
//! The scanner pulls one line at a time from the underlying reader, so memory
//! use is bounded by the longest header line. Once `end_header` has been
//! produced nothing more is read: the reader stays positioned at the first
//! byte of the body.

use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;

use crate::types::{END_HEADER, Result};

//  Tokens

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Ply,
    Format,
    Comment,
    ObjInfo,
    Element,
    Property,
    List,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ply => "ply",
            Self::Format => "format",
            Self::Comment => "comment",
            Self::ObjInfo => "obj_info",
            Self::Element => "element",
            Self::Property => "property",
            Self::List => "list",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "ply" => Some(Self::Ply),
            "format" => Some(Self::Format),
            "comment" => Some(Self::Comment),
            "obj_info" => Some(Self::ObjInfo),
            "element" => Some(Self::Element),
            "property" => Some(Self::Property),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,
    EndOfHeader,
}

impl TokenKind {
    /// Quoted description used in diagnostics, e.g. `'<number>'`.
    pub fn describe(self) -> String {
        match self {
            Self::Keyword(kw) => format!("'{}'", kw.as_str()),
            Self::Identifier => "'<identifier>'".to_string(),
            Self::Number => "'<number>'".to_string(),
            Self::EndOfHeader => format!("'{END_HEADER}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line the token was read from.
    pub line: usize,
}

impl Token {
    fn classify(lexeme: String, line: usize) -> Self {
        let kind = if lexeme == END_HEADER {
            TokenKind::EndOfHeader
        } else if let Some(kw) = Keyword::from_word(&lexeme) {
            TokenKind::Keyword(kw)
        } else if lexeme.bytes().all(|b| b.is_ascii_digit()) {
            TokenKind::Number
        } else {
            TokenKind::Identifier
        };
        Self { kind, lexeme, line }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Keyword(kw)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.lexeme)
    }
}

//  Scanner

pub struct Scanner<R> {
    reader: R,
    words: VecDeque<String>,
    lookahead: Option<Token>,
    line: usize,
    finished: bool,
    comments: Vec<String>,
    obj_info: Vec<String>,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            words: VecDeque::new(),
            lookahead: None,
            line: 0,
            finished: false,
            comments: Vec::new(),
            obj_info: Vec::new(),
        }
    }

    /// Consume the next token; `None` once the input is exhausted or the
    /// header has ended.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        match self.lookahead.take() {
            Some(token) => Ok(Some(token)),
            None => self.scan(),
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Option<&Token>> {
        if self.lookahead.is_none() {
            self.lookahead = self.scan()?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Number of lines read so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Text of every `comment` line skipped so far, in order.
    pub fn take_comments(&mut self) -> Vec<String> {
        std::mem::take(&mut self.comments)
    }

    /// Text of every `obj_info` line skipped so far, in order.
    pub fn take_obj_info(&mut self) -> Vec<String> {
        std::mem::take(&mut self.obj_info)
    }

    fn scan(&mut self) -> Result<Option<Token>> {
        loop {
            if self.finished {
                return Ok(None);
            }
            if let Some(word) = self.words.pop_front() {
                let token = Token::classify(word, self.line);
                if token.kind == TokenKind::EndOfHeader {
                    // Anything after `end_header` on its line belongs to no one.
                    self.words.clear();
                    self.finished = true;
                }
                return Ok(Some(token));
            }
            if !self.read_line()? {
                self.finished = true;
            }
        }
    }

    /// Split the next line into words; returns `false` at end of input.
    fn read_line(&mut self) -> Result<bool> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(false);
        }
        self.line += 1;

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim();
        let first = text.split_whitespace().next().unwrap_or_default();
        match Keyword::from_word(first) {
            Some(Keyword::Comment) => self.comments.push(text[first.len()..].trim().to_string()),
            Some(Keyword::ObjInfo) => self.obj_info.push(text[first.len()..].trim().to_string()),
            _ => self.words.extend(text.split_whitespace().map(String::from)),
        }
        Ok(true)
    }
}
