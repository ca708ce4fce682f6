use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    config::LexerConfig,
    tokens::{Token, TokenKind, TokenValue},
};

/// Classification of the run currently being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Identifier,
    Numeric,
    Symbol,
}

fn classify(byte: u8) -> Option<RunKind> {
    if byte.is_ascii_digit() {
        Some(RunKind::Numeric)
    } else if byte.is_ascii_alphabetic() || byte == b'_' {
        Some(RunKind::Identifier)
    } else if byte.is_ascii_whitespace() {
        None
    } else {
        Some(RunKind::Symbol)
    }
}

pub struct Lexer<'a> {
    config: &'a LexerConfig,
    tokens: Vec<Token>,
    source: &'a [u8],
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,

    run: Vec<u8>,
    run_kind: Option<RunKind>,
    run_start: (u32, u32),

    comment_depth: u32,
    comment_start: Option<Position>,
    in_line_comment: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], file: Rc<String>, config: &'a LexerConfig) -> Lexer<'a> {
        Lexer {
            config,
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file,
            run: vec![],
            run_kind: None,
            run_start: (1, 1),
            comment_depth: 0,
            comment_start: None,
            in_line_comment: false,
        }
    }

    pub fn advance(&mut self) {
        if self.at() == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.at_eof() {
                break;
            }
            self.advance();
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> u8 {
        self.source[self.pos]
    }

    pub fn peek(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    pub fn starts_with(&self, text: &[u8]) -> bool {
        self.source[self.pos..].starts_with(text)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    fn position_at(&self, line: u32, column: u32) -> Position {
        Position::new(line, column, Rc::clone(&self.file))
    }

    /// Whether `byte` can be appended to the run in progress.
    fn extends_run(&self, byte: u8) -> bool {
        match self.run_kind {
            Some(RunKind::Identifier) => byte.is_ascii_alphanumeric() || byte == b'_',
            Some(RunKind::Numeric) => {
                byte.is_ascii_digit()
                    || (byte == b'.'
                        && !self.run.contains(&b'.')
                        && self.peek(1).is_some_and(|next| next.is_ascii_digit()))
            }
            Some(RunKind::Symbol) => classify(byte) == Some(RunKind::Symbol),
            None => false,
        }
    }

    fn start_run(&mut self, kind: RunKind) {
        self.run_kind = Some(kind);
        self.run_start = (self.line, self.column);
    }

    fn close_run(&mut self) -> Result<(), Error> {
        let Some(kind) = self.run_kind.take() else {
            return Ok(());
        };
        let run = std::mem::take(&mut self.run);
        let (line, column) = self.run_start;

        match kind {
            RunKind::Identifier => identifier_handler(self, run, line, column),
            RunKind::Numeric => number_handler(self, run, line, column),
            RunKind::Symbol => {
                symbol_handler(self, run, line, column);
                Ok(())
            }
        }
    }
}

fn identifier_handler(lexer: &mut Lexer, run: Vec<u8>, line: u32, column: u32) -> Result<(), Error> {
    let position = lexer.position_at(line, column);
    let name = String::from_utf8_lossy(&run).into_owned();

    if name.len() > lexer.config.max_identifier_len {
        return Err(Error::new(
            ErrorImpl::IdentifierTooLong {
                length: name.len(),
                max: lexer.config.max_identifier_len,
            },
            position,
        ));
    }

    if let Some(kind) = lexer.config.keyword(&name) {
        lexer.push(MK_TOKEN!(kind, TokenValue::None, position));
    } else {
        lexer.push(MK_TOKEN!(
            TokenKind::Identifier,
            TokenValue::Identifier(name),
            position
        ));
    }

    Ok(())
}

fn number_handler(lexer: &mut Lexer, run: Vec<u8>, line: u32, column: u32) -> Result<(), Error> {
    let position = lexer.position_at(line, column);
    let text = String::from_utf8_lossy(&run).into_owned();

    let token = if text.contains('.') {
        match text.parse::<f64>() {
            Ok(value) => MK_TOKEN!(TokenKind::FloatConst, TokenValue::Float(value), position),
            Err(_) => {
                return Err(Error::new(ErrorImpl::NumberParseError { token: text }, position))
            }
        }
    } else {
        match text.parse::<i64>() {
            Ok(value) => MK_TOKEN!(TokenKind::IntConst, TokenValue::Int(value), position),
            Err(_) => {
                return Err(Error::new(ErrorImpl::NumberParseError { token: text }, position))
            }
        }
    };

    lexer.push(token);
    Ok(())
}

/// Splits a symbol run into tokens, preferring the longest operator at each offset.
///
/// Bytes after a matched operator are scanned again from their own offset, so
/// `:=:` yields `:=` then `:`.
fn symbol_handler(lexer: &mut Lexer, run: Vec<u8>, line: u32, column: u32) {
    let mut offset = 0;

    while offset < run.len() {
        let position = lexer.position_at(line, column + offset as u32);

        if let Some((kind, len)) = lexer.config.longest_operator(&run[offset..]) {
            lexer.push(MK_TOKEN!(kind, TokenValue::None, position));
            offset += len;
        } else {
            lexer.push(MK_TOKEN!(
                TokenKind::from_punctuation(run[offset]),
                TokenValue::None,
                position
            ));
            offset += 1;
        }
    }
}

fn unescape(byte: u8) -> u8 {
    match byte {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        b'0' => b'\0',
        other => other,
    }
}

fn char_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.position();
    let unterminated = |start: &Position| Error::new(ErrorImpl::UnterminatedCharLiteral, start.clone());

    // Opening quote
    lexer.advance();

    let value = match lexer.peek(0) {
        None | Some(b'\n') => return Err(unterminated(&start)),
        Some(b'\\') => {
            lexer.advance();
            let escaped = match lexer.peek(0) {
                None | Some(b'\n') => return Err(unterminated(&start)),
                Some(escaped) => escaped,
            };
            lexer.advance();
            unescape(escaped)
        }
        Some(byte) => {
            lexer.advance();
            byte
        }
    };

    if lexer.peek(0) != Some(b'\'') {
        return Err(unterminated(&start));
    }
    lexer.advance();

    lexer.push(MK_TOKEN!(TokenKind::CharConst, TokenValue::Char(value), start));
    Ok(())
}

fn string_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let start = lexer.position();
    let mut result: Vec<u8> = Vec::new();

    // Opening quote
    lexer.advance();

    loop {
        let Some(byte) = lexer.peek(0) else {
            return Err(Error::new(ErrorImpl::UnterminatedStringLiteral, start));
        };

        match byte {
            b'"' => {
                lexer.advance();
                break;
            }
            b'\\' => {
                lexer.advance();
                let Some(escaped) = lexer.peek(0) else {
                    return Err(Error::new(ErrorImpl::UnterminatedStringLiteral, start));
                };
                lexer.advance();

                if escaped == b'x' {
                    let mut hex = String::new();
                    for _ in 0..2 {
                        match lexer.peek(0) {
                            Some(digit) if digit.is_ascii_hexdigit() => {
                                hex.push(digit as char);
                                lexer.advance();
                            }
                            _ => break,
                        }
                    }

                    match u8::from_str_radix(&hex, 16) {
                        Ok(value) => result.push(value),
                        // Keep a bare `\x` as written
                        Err(_) => result.extend_from_slice(b"\\x"),
                    }
                } else {
                    result.push(unescape(escaped));
                }
            }
            other => {
                result.push(other);
                lexer.advance();
            }
        }
    }

    lexer.push(MK_TOKEN!(
        TokenKind::StringConst,
        TokenValue::String(result),
        start
    ));
    Ok(())
}

/// Consumes one step of a multi-line comment, tracking nesting.
fn comment_handler(lexer: &mut Lexer) {
    if lexer.starts_with(b"{-") {
        lexer.comment_depth += 1;
        lexer.advance_n(2);
    } else if lexer.starts_with(b"-}") {
        lexer.comment_depth -= 1;
        lexer.advance_n(2);
    } else {
        lexer.advance();
    }
}

/// Converts source bytes into tokens, ending with a single `EOF` token.
///
/// Characters that start no known token are still emitted as single-character
/// tokens; only malformed literals, out-of-range numbers, oversized identifiers
/// and unterminated `{-` comments are errors.
pub fn tokenize(source: &[u8], file: Rc<String>, config: &LexerConfig) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file, config);

    while !lex.at_eof() {
        if lex.in_line_comment {
            if lex.at() == b'\n' {
                lex.in_line_comment = false;
            }
            lex.advance();
            continue;
        }

        if lex.comment_depth > 0 {
            comment_handler(&mut lex);
            continue;
        }

        if lex.starts_with(b"{-") {
            lex.close_run()?;
            lex.comment_start = Some(lex.position());
            lex.comment_depth = 1;
            lex.advance_n(2);
            continue;
        }

        if lex.starts_with(b"//") {
            lex.close_run()?;
            lex.in_line_comment = true;
            lex.advance_n(2);
            continue;
        }

        match lex.at() {
            b'\'' => {
                lex.close_run()?;
                char_handler(&mut lex)?;
            }
            b'"' => {
                lex.close_run()?;
                string_handler(&mut lex)?;
            }
            byte => match classify(byte) {
                None => {
                    lex.close_run()?;
                    lex.advance();
                }
                Some(kind) => {
                    if !lex.extends_run(byte) {
                        lex.close_run()?;
                        lex.start_run(kind);
                    }
                    lex.run.push(byte);
                    lex.advance();
                }
            },
        }
    }

    lex.close_run()?;

    if lex.comment_depth > 0 {
        let position = lex.comment_start.take().unwrap_or_else(|| lex.position());
        return Err(Error::new(ErrorImpl::UnterminatedComment, position));
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, TokenValue::None, position));
    Ok(lex.tokens)
}

/// Logs every token at info level.
pub fn log_tokens(tokens: &[Token]) {
    for token in tokens {
        token.log();
    }
}
