//! Header parser — enforces the header grammar over the scanner's tokens.
//!
//! ```text
//! header       := 'ply' format elementDecl* 'end_header'
//! format       := 'format' formatName version
//! elementDecl  := 'element' name count propertyDecl*
//! propertyDecl := 'property' type name
//!               | 'property' 'list' sizeType type name
//! ```
//!
//! `comment` and `obj_info` lines never reach the parser; the scanner drops
//! them and keeps their text.

use std::io::BufRead;

use tracing::trace;

use crate::scanner::{Keyword, Scanner, Token, TokenKind};
use crate::types::*;

const END_OF_INPUT: &str = "'<end of input>'";
const FORMAT_NAME: &str = "'<format name>'";
const VERSION: &str = "'<version>'";
const PROPERTY_TYPE: &str = "'<property type>'";

/// Everything the header declares.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHeader {
    pub format: PlyFormat,
    pub version: String,
    pub elements: Vec<PlyElement>,
    pub comments: Vec<String>,
    pub obj_info: Vec<String>,
}

/// Position in the declaration list once the format line has been read.
enum State {
    AwaitingElementOrEnd,
    /// An element is open and collects the properties that follow it.
    AwaitingPropertyOrNext(PlyElement),
}

pub struct HeaderParser<R> {
    scanner: Scanner<R>,
}

impl<R: BufRead> HeaderParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            scanner: Scanner::new(reader),
        }
    }

    /// Run the parse to completion. Stops reading right after `end_header`.
    pub fn parse(mut self) -> Result<ParsedHeader> {
        self.expect(TokenKind::Keyword(Keyword::Ply))?;
        let (format, version) = self.format_line()?;

        let mut elements = Vec::new();
        let mut state = State::AwaitingElementOrEnd;
        loop {
            let token = self.scanner.next_token()?;
            state = match (state, token) {
                (state, Some(token)) if token.is_keyword(Keyword::Element) => {
                    if let State::AwaitingPropertyOrNext(done) = state {
                        elements.push(close(done));
                    }
                    State::AwaitingPropertyOrNext(self.element_decl()?)
                }
                (State::AwaitingPropertyOrNext(mut element), Some(token))
                    if token.is_keyword(Keyword::Property) =>
                {
                    element.properties.push(self.property_decl()?);
                    State::AwaitingPropertyOrNext(element)
                }
                (state, Some(token)) if token.kind == TokenKind::EndOfHeader => {
                    if let State::AwaitingPropertyOrNext(done) = state {
                        elements.push(close(done));
                    }
                    break;
                }
                (State::AwaitingElementOrEnd, found) => {
                    return Err(self.unexpected("'element' or 'end_header'", found.as_ref()));
                }
                (State::AwaitingPropertyOrNext(_), found) => {
                    return Err(
                        self.unexpected("'property', 'element' or 'end_header'", found.as_ref())
                    );
                }
            };
        }

        Ok(ParsedHeader {
            format,
            version,
            elements,
            comments: self.scanner.take_comments(),
            obj_info: self.scanner.take_obj_info(),
        })
    }

    //  Productions

    fn format_line(&mut self) -> Result<(PlyFormat, String)> {
        self.expect(TokenKind::Keyword(Keyword::Format))?;

        let name = match self.scanner.next_token()? {
            Some(token) if matches!(token.kind, TokenKind::Identifier | TokenKind::Number) => token,
            found => return Err(self.unexpected(FORMAT_NAME, found.as_ref())),
        };
        let format: PlyFormat = name.lexeme.parse()?;
        if !format.is_supported() {
            return Err(PlyError::UnsupportedFormat { format: name.lexeme });
        }

        let version = match self.scanner.next_token()? {
            Some(token) if matches!(token.kind, TokenKind::Identifier | TokenKind::Number) => token,
            found => return Err(self.unexpected(VERSION, found.as_ref())),
        };
        Ok((format, version.lexeme))
    }

    fn element_decl(&mut self) -> Result<PlyElement> {
        let name = self.expect(TokenKind::Identifier)?;
        let count = self.expect(TokenKind::Number)?;
        let size = count
            .lexeme
            .parse::<u64>()
            .map_err(|_| self.unexpected(TokenKind::Number.describe(), Some(&count)))?;
        Ok(PlyElement::new(name.lexeme, size))
    }

    fn property_decl(&mut self) -> Result<PlyProperty> {
        let is_list = matches!(self.scanner.peek_token()?, Some(t) if t.is_keyword(Keyword::List));
        if is_list {
            self.scanner.next_token()?;
            let size_type = self.property_type()?;
            let data_type = self.property_type()?;
            let name = self.expect(TokenKind::Identifier)?;
            Ok(PlyProperty::list(name.lexeme, size_type, data_type))
        } else {
            let data_type = self.property_type()?;
            let name = self.expect(TokenKind::Identifier)?;
            Ok(PlyProperty::scalar(name.lexeme, data_type))
        }
    }

    fn property_type(&mut self) -> Result<PropertyType> {
        let token = self.scanner.next_token()?;
        match &token {
            Some(t) if t.kind == TokenKind::Identifier => t
                .lexeme
                .parse()
                .map_err(|_| self.unexpected(PROPERTY_TYPE, token.as_ref())),
            found => Err(self.unexpected(PROPERTY_TYPE, found.as_ref())),
        }
    }

    //  Token helpers

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        match self.scanner.next_token()? {
            Some(token) if token.kind == kind => Ok(token),
            found => Err(self.unexpected(kind.describe(), found.as_ref())),
        }
    }

    fn unexpected(&self, expected: impl Into<String>, found: Option<&Token>) -> PlyError {
        let (actual, line) = match found {
            Some(token) => (token.to_string(), token.line),
            None => (END_OF_INPUT.to_string(), self.scanner.line().max(1)),
        };
        PlyError::UnexpectedToken {
            expected: expected.into(),
            actual,
            line,
        }
    }
}

fn close(element: PlyElement) -> PlyElement {
    trace!(
        element = %element.name,
        size = element.size,
        properties = element.properties.len(),
        "element declared"
    );
    element
}
