//! XML Tokenizer - State machine for XML token extraction
//!
//! Implements a pull-parser style tokenizer that extracts XML tokens:
//! - Element start/end tags
//! - Text content
//! - CDATA sections
//! - Comments
//! - Processing instructions and the XML declaration
//!
//! Fidelity-first: character data and attribute spans are reported as raw
//! byte slices of the input. Entities are never decoded and whitespace is
//! never trimmed; a parse/serialize round trip must not disturb content
//! the renderer depends on.

use super::scanner::Scanner;
use crate::error::FillError;

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
    /// End of input
    Eof,
}

/// A parsed XML token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end) covering the whole construct
    pub span: (usize, usize),
    /// For tags and PIs: the name, verbatim including any prefix
    pub name: Option<&'a [u8]>,
    /// For text: the raw character data.
    /// For comments, CDATA, PIs, declarations: the complete raw markup,
    /// delimiters included, for verbatim re-emission.
    pub content: Option<&'a [u8]>,
    /// For start/empty tags: the raw bytes after the name, holding attributes
    pub attr_bytes: Option<&'a [u8]>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
            attr_bytes: None,
        }
    }
}

/// XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
        }
    }

    /// Extract the next token, or `TokenKind::Eof` at end of input
    pub fn next_token(&mut self) -> Result<Token<'a>, FillError> {
        let start = self.scanner.position();

        if self.scanner.is_eof() {
            return Ok(Token::new(TokenKind::Eof, (start, start)));
        }

        if self.scanner.peek() == Some(b'<') {
            self.markup_token(start)
        } else {
            self.text_token(start)
        }
    }

    /// Raw character data up to the next '<' (or end of input)
    fn text_token(&mut self, start: usize) -> Result<Token<'a>, FillError> {
        let end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
        let content = self.scanner.slice(start, end);
        self.scanner.advance(end - self.scanner.position());

        let mut token = Token::new(TokenKind::Text, (start, end));
        token.content = Some(content);
        Ok(token)
    }

    /// A construct starting with '<'
    fn markup_token(&mut self, start: usize) -> Result<Token<'a>, FillError> {
        if self.scanner.starts_with(b"<!--") {
            return self.delimited_token(start, b"-->", TokenKind::Comment, "unterminated comment");
        }
        if self.scanner.starts_with(b"<![CDATA[") {
            return self.delimited_token(start, b"]]>", TokenKind::CData, "unterminated CDATA section");
        }
        if self.scanner.starts_with(b"<?") {
            return self.pi_token(start);
        }
        if self.scanner.starts_with(b"<!") {
            return self.doctype_token(start);
        }
        if self.scanner.starts_with(b"</") {
            return self.end_tag_token(start);
        }
        self.start_tag_token(start)
    }

    /// Comment or CDATA: capture the full raw markup through its terminator
    fn delimited_token(
        &mut self,
        start: usize,
        terminator: &[u8],
        kind: TokenKind,
        err: &str,
    ) -> Result<Token<'a>, FillError> {
        let term_pos = self
            .scanner
            .find_sequence(terminator)
            .ok_or_else(|| FillError::parse(err, start))?;
        let end = term_pos + terminator.len();
        let content = self.scanner.slice(start, end);
        self.scanner.advance(end - self.scanner.position());

        let mut token = Token::new(kind, (start, end));
        token.content = Some(content);
        Ok(token)
    }

    /// Processing instruction or XML declaration
    fn pi_token(&mut self, start: usize) -> Result<Token<'a>, FillError> {
        let term_pos = self
            .scanner
            .find_sequence(b"?>")
            .ok_or_else(|| FillError::parse("unterminated processing instruction", start))?;
        // "<?>" finds the overlapping "?>" one byte in; a real PI has its
        // terminator at or past the end of "<?"
        if term_pos < start + 2 {
            return Err(FillError::parse("malformed processing instruction", start));
        }
        let end = term_pos + 2;
        let raw = self.scanner.slice(start, end);
        self.scanner.advance(end - self.scanner.position());

        // Target name: after "<?" up to whitespace or "?>"
        let inner = &raw[2..raw.len() - 2];
        let name_len = inner
            .iter()
            .position(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            .unwrap_or(inner.len());
        let name = &inner[..name_len];

        let kind = if name == b"xml" {
            TokenKind::XmlDeclaration
        } else {
            TokenKind::ProcessingInstruction
        };

        let mut token = Token::new(kind, (start, end));
        token.name = Some(name);
        token.content = Some(raw);
        Ok(token)
    }

    /// DOCTYPE declaration, tracking an internal subset's brackets
    fn doctype_token(&mut self, start: usize) -> Result<Token<'a>, FillError> {
        let mut pos = start;
        let mut bracket_depth = 0i32;
        let end = loop {
            match self.scanner.byte_at(pos) {
                Some(b'[') => bracket_depth += 1,
                Some(b']') => bracket_depth -= 1,
                Some(b'>') if bracket_depth == 0 => break pos + 1,
                Some(_) => {}
                None => return Err(FillError::parse("unterminated DOCTYPE declaration", start)),
            }
            pos += 1;
        };
        let raw = self.scanner.slice(start, end);
        self.scanner.advance(end - self.scanner.position());

        let mut token = Token::new(TokenKind::DocType, (start, end));
        token.content = Some(raw);
        Ok(token)
    }

    /// End tag: </name>
    fn end_tag_token(&mut self, start: usize) -> Result<Token<'a>, FillError> {
        let gt = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| FillError::parse("unterminated end tag", start))?;
        let name = trim_ascii(self.scanner.slice(start + 2, gt));
        self.scanner.advance(gt + 1 - self.scanner.position());

        let mut token = Token::new(TokenKind::EndTag, (start, gt + 1));
        token.name = Some(name);
        Ok(token)
    }

    /// Start or empty-element tag: <name attrs...> or <name attrs.../>
    fn start_tag_token(&mut self, start: usize) -> Result<Token<'a>, FillError> {
        let gt = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| FillError::parse("unterminated start tag", start))?;
        let mut inner = self.scanner.slice(start + 1, gt);

        let kind = if inner.ends_with(b"/") {
            inner = &inner[..inner.len() - 1];
            TokenKind::EmptyTag
        } else {
            TokenKind::StartTag
        };

        let name_len = inner
            .iter()
            .position(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            .unwrap_or(inner.len());
        let name = &inner[..name_len];
        if name.is_empty() {
            return Err(FillError::parse("empty element name", start));
        }

        self.scanner.advance(gt + 1 - self.scanner.position());

        let mut token = Token::new(kind, (start, gt + 1));
        token.name = Some(name);
        token.attr_bytes = Some(&inner[name_len..]);
        Ok(token)
    }
}

/// Trim ASCII whitespace from both ends of a byte slice
fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if matches!(first, b' ' | b'\t' | b'\n' | b'\r') {
            bytes = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., last] = bytes {
        if matches!(last, b' ' | b'\t' | b'\n' | b'\r') {
            bytes = rest;
        } else {
            break;
        }
    }
    bytes
}
