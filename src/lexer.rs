use std::iter::Peekable;
use std::str::CharIndices;

use bitflags::bitflags;
use thiserror::Error;

use crate::limits::CompilerLimits;
use crate::source::{SourceFile, SourceLocation};

// Token types

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftSquare,   // [
    RightSquare,  // ]
    LeftCurly,    // {
    RightCurly,   // }
    LeftAngle,    // <
    RightAngle,   // >
    Dot,          // .
    Comma,        // ,
    Semicolon,    // ;
    Colon,        // :
    Question,     // ?
    Equal,        // =
    Ampersand,    // &
    Arrow,        // ->

    // Declaration keywords
    As,
    Library,
    Using,
    Array,
    Handle,
    Request,
    String,
    Vector,
    Const,
    Enum,
    Interface,
    Struct,
    Union,

    // Primitive type keywords
    Bool,
    Status,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,

    // Handle subtype keywords (`event` doubles as the method event keyword)
    Process,
    Thread,
    Vmo,
    Channel,
    Event,
    Port,
    Interrupt,
    Iomap,
    Pci,
    Log,
    Socket,
    Resource,
    Eventpair,
    Job,
    Vmar,
    Fifo,
    Hypervisor,
    Guest,
    Timer,

    // Literal keywords
    True,
    False,
    Default,

    // Identifiers and literals
    Identifier,
    StringLiteral,
    NumericLiteral,

    EndOfFile,
}

bitflags! {
    /// Closed sets of token kinds the parser dispatches on
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenClass: u8 {
        const PRIMITIVE_TYPE = 1 << 0;
        /// Kinds that can start a `Type`
        const TYPE = 1 << 1;
        /// Kinds that can start a `Literal`
        const LITERAL = 1 << 2;
    }
}

impl TokenKind {
    /// The dispatch classes this kind belongs to
    pub fn class(self) -> TokenClass {
        use TokenKind::*;
        match self {
            Bool | Status | Int8 | Int16 | Int32 | Int64 | Uint8 | Uint16 | Uint32 | Uint64
            | Float32 | Float64 => TokenClass::PRIMITIVE_TYPE | TokenClass::TYPE,
            Identifier | Array | Vector | String | Handle | Request => TokenClass::TYPE,
            Default | True | False | NumericLiteral | StringLiteral => TokenClass::LITERAL,
            _ => TokenClass::empty(),
        }
    }

    pub fn is(self, class: TokenClass) -> bool {
        self.class().contains(class)
    }
}

/// Keyword table, matched on exact spelling
fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "as" => TokenKind::As,
        "library" => TokenKind::Library,
        "using" => TokenKind::Using,
        "array" => TokenKind::Array,
        "handle" => TokenKind::Handle,
        "request" => TokenKind::Request,
        "string" => TokenKind::String,
        "vector" => TokenKind::Vector,
        "const" => TokenKind::Const,
        "enum" => TokenKind::Enum,
        "interface" => TokenKind::Interface,
        "struct" => TokenKind::Struct,
        "union" => TokenKind::Union,

        "bool" => TokenKind::Bool,
        "status" => TokenKind::Status,
        "int8" => TokenKind::Int8,
        "int16" => TokenKind::Int16,
        "int32" => TokenKind::Int32,
        "int64" => TokenKind::Int64,
        "uint8" => TokenKind::Uint8,
        "uint16" => TokenKind::Uint16,
        "uint32" => TokenKind::Uint32,
        "uint64" => TokenKind::Uint64,
        "float32" => TokenKind::Float32,
        "float64" => TokenKind::Float64,

        "process" => TokenKind::Process,
        "thread" => TokenKind::Thread,
        "vmo" => TokenKind::Vmo,
        "channel" => TokenKind::Channel,
        "event" => TokenKind::Event,
        "port" => TokenKind::Port,
        "interrupt" => TokenKind::Interrupt,
        "iomap" => TokenKind::Iomap,
        "pci" => TokenKind::Pci,
        "log" => TokenKind::Log,
        "socket" => TokenKind::Socket,
        "resource" => TokenKind::Resource,
        "eventpair" => TokenKind::Eventpair,
        "job" => TokenKind::Job,
        "vmar" => TokenKind::Vmar,
        "fifo" => TokenKind::Fifo,
        "hypervisor" => TokenKind::Hypervisor,
        "guest" => TokenKind::Guest,
        "timer" => TokenKind::Timer,

        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "default" => TokenKind::Default,
        _ => return None,
    };
    Some(kind)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn text<'s>(&self, source: &'s SourceFile) -> &'s str {
        source.text(self.location)
    }
}

/// Lexed token list, always terminated by a single `EndOfFile`
#[derive(Debug, Clone)]
pub struct Tokens {
    list: Vec<Token>,
}

impl Tokens {
    pub fn new(mut list: Vec<Token>) -> Self {
        if list.last().map(|t| t.kind) != Some(TokenKind::EndOfFile) {
            let end = list.last().map_or(0, |t| t.location.end);
            list.push(Token {
                kind: TokenKind::EndOfFile,
                location: SourceLocation::new(end, end),
            });
        }
        Self { list }
    }

    pub fn peek_kind(&self, index: usize) -> TokenKind {
        self.get(index).kind
    }

    /// Token at `index`, clamped to the trailing `EndOfFile`
    pub fn get(&self, index: usize) -> &Token {
        let last = self.list.len() - 1;
        &self.list[index.min(last)]
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.list.iter()
    }
}

#[derive(Debug, Clone, Error)]
#[error("Lexical error at {line}:{column}: {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub pos: usize,
}

// Lexer

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
    limits: &'a CompilerLimits,
    token_count: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceFile, limits: &'a CompilerLimits) -> Result<Self, LexError> {
        let data = source.data();

        if data.len() > limits.max_input_size {
            return Err(LexError {
                message: format!(
                    "Input too large: {} bytes (max: {} bytes)",
                    data.len(),
                    limits.max_input_size
                ),
                line: 1,
                column: 1,
                pos: 0,
            });
        }

        Ok(Self {
            source: data,
            chars: data.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
            limits,
            token_count: 0,
        })
    }

    // Character navigation

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_char2(&mut self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.peek().map(|(_, c)| *c)
    }

    fn consume_char(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.pos = pos + ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn consume_while<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(char) -> bool,
    {
        let mut consumed = false;
        while let Some(c) = self.peek_char() {
            if !predicate(c) {
                break;
            }
            self.consume_char();
            consumed = true;
        }
        consumed
    }

    fn error(&self, message: String) -> LexError {
        LexError {
            message,
            line: self.line,
            column: self.column,
            pos: self.pos,
        }
    }

    /// Skip whitespace and `//` comments
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.consume_char();
                }
                Some('/') if self.peek_char2() == Some('/') => {
                    let comment_start = self.pos;
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.consume_char();
                        let comment_len = self.pos - comment_start;
                        if comment_len > self.limits.max_comment_length {
                            return Err(self.error(format!(
                                "Comment too long: {} bytes (max: {} bytes)",
                                comment_len, self.limits.max_comment_length
                            )));
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // Main tokenization method

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        // EndOfFile is not counted
        if self.peek_char().is_some() && self.token_count >= self.limits.max_token_count {
            return Err(self.error(format!(
                "Token limit exceeded: {} tokens (max: {})",
                self.token_count, self.limits.max_token_count
            )));
        }

        let start = self.pos;

        let kind = match self.peek_char() {
            None => TokenKind::EndOfFile,
            Some(c) if c.is_ascii_digit() => self.lex_number()?,
            Some('-') => match self.peek_char2() {
                Some('>') => {
                    self.consume_char();
                    self.consume_char();
                    TokenKind::Arrow
                }
                Some(c) if c.is_ascii_digit() => self.lex_number()?,
                _ => {
                    self.consume_char();
                    return Err(self.error("Unexpected character: '-'".into()));
                }
            },
            Some(c) if is_ident_start(c) => self.lex_ident_or_keyword()?,
            Some('"') => self.lex_string()?,
            Some(c) => {
                self.consume_char();
                match c {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    '[' => TokenKind::LeftSquare,
                    ']' => TokenKind::RightSquare,
                    '{' => TokenKind::LeftCurly,
                    '}' => TokenKind::RightCurly,
                    '<' => TokenKind::LeftAngle,
                    '>' => TokenKind::RightAngle,
                    '.' => TokenKind::Dot,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    ':' => TokenKind::Colon,
                    '?' => TokenKind::Question,
                    '=' => TokenKind::Equal,
                    '&' => TokenKind::Ampersand,
                    _ => return Err(self.error(format!("Unexpected character: '{}'", c))),
                }
            }
        };

        self.token_count += 1;

        Ok(Token {
            kind,
            location: SourceLocation::new(start, self.pos),
        })
    }

    fn lex_ident_or_keyword(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        self.consume_while(is_ident_continue);

        let text = &self.source[start..self.pos];

        if text.len() > self.limits.max_identifier_length {
            return Err(self.error(format!(
                "Identifier too long: {} bytes (max: {} bytes)",
                text.len(),
                self.limits.max_identifier_length
            )));
        }

        Ok(keyword(text).unwrap_or(TokenKind::Identifier))
    }

    // Number lexing

    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        if self.peek_char() == Some('-') {
            self.consume_char();
        }

        if self.peek_char() == Some('0') {
            match self.peek_char2() {
                Some('x') | Some('X') => {
                    self.consume_char();
                    self.consume_char();
                    if !self.consume_while(|c| c.is_ascii_hexdigit()) {
                        return Err(self.error("Hex number must have at least one digit".into()));
                    }
                    return self.finish_number();
                }
                Some('b') | Some('B') => {
                    self.consume_char();
                    self.consume_char();
                    if !self.consume_while(|c| c == '0' || c == '1') {
                        return Err(
                            self.error("Binary number must have at least one digit".into())
                        );
                    }
                    return self.finish_number();
                }
                _ => {}
            }
        }

        self.consume_while(|c| c.is_ascii_digit());

        // Fraction only when a digit follows the dot, so `1.foo` is not a float
        if self.peek_char() == Some('.') && self.peek_char2().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
            self.consume_while(|c| c.is_ascii_digit());
        }

        if let Some('e') | Some('E') = self.peek_char() {
            self.consume_char();
            if let Some('+') | Some('-') = self.peek_char() {
                self.consume_char();
            }
            if !self.consume_while(|c| c.is_ascii_digit()) {
                return Err(self.error("Exponent must have digits".into()));
            }
        }

        self.finish_number()
    }

    fn finish_number(&mut self) -> Result<TokenKind, LexError> {
        match self.peek_char() {
            Some(c) if is_ident_continue(c) => {
                Err(self.error(format!("Invalid character in numeric literal: '{}'", c)))
            }
            _ => Ok(TokenKind::NumericLiteral),
        }
    }

    // String lexing

    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        self.consume_char(); // opening quote

        loop {
            match self.peek_char() {
                None => return Err(self.error("Unterminated string literal".into())),
                Some('\n') => return Err(self.error("Newline in string literal".into())),
                Some('\\') => {
                    self.consume_char();
                    if self.consume_char().is_none() {
                        return Err(self.error("Unterminated escape sequence".into()));
                    }
                }
                Some('"') => {
                    self.consume_char();
                    break;
                }
                Some(_) => {
                    self.consume_char();
                }
            }
        }

        let len = self.pos - start;
        if len > self.limits.max_string_length {
            return Err(self.error(format!(
                "String literal too long: {} bytes (max: {} bytes)",
                len, self.limits.max_string_length
            )));
        }

        Ok(TokenKind::StringLiteral)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Public API

pub fn lex(source: &SourceFile, limits: &CompilerLimits) -> Result<Tokens, LexError> {
    let mut lexer = Lexer::new(source, limits)?;
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let is_eof = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    tracing::trace!(file = source.filename(), count = tokens.len(), "lexed");
    Ok(Tokens::new(tokens))
}
