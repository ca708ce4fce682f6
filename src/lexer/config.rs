//! Keyword and operator tables used by the lexer.
//!
//! A `LexerConfig` is built once per compilation session and handed to
//! [`tokenize`](super::lexer::tokenize) by reference, so separate runs never
//! share mutable tables.

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::tokens::TokenKind;

/// Longest identifier the lexer accepts.
pub const MAX_IDENTIFIER_LEN: usize = 512;

lazy_static! {
    static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("return", TokenKind::Return);
        map.insert("const", TokenKind::Const);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("double", TokenKind::Double);
        map.insert("byte", TokenKind::Byte);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("foreign", TokenKind::Foreign);
        map.insert("from", TokenKind::From);
        map
    };
    static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert(":=", TokenKind::ColonAssign);
        map.insert("<=", TokenKind::LessEquals);
        map.insert(">=", TokenKind::GreaterEquals);
        map.insert("!=", TokenKind::NotEquals);
        map.insert("==", TokenKind::Equals);
        map.insert("++", TokenKind::PlusPlus);
        map.insert("--", TokenKind::MinusMinus);
        map.insert("->", TokenKind::Arrow);
        map
    };
}

#[derive(Debug, Clone)]
pub struct LexerConfig {
    keywords: HashMap<String, TokenKind>,
    operators: HashMap<String, TokenKind>,
    max_operator_len: usize,
    pub max_identifier_len: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        let mut config = LexerConfig {
            keywords: HashMap::new(),
            operators: HashMap::new(),
            max_operator_len: 0,
            max_identifier_len: MAX_IDENTIFIER_LEN,
        };

        for (name, kind) in RESERVED_LOOKUP.iter() {
            config = config.with_keyword(name, *kind);
        }
        for (text, kind) in OPERATOR_LOOKUP.iter() {
            config = config.with_operator(text, *kind);
        }

        config
    }
}

impl LexerConfig {
    /// A config with no keywords and no multi-character operators.
    pub fn empty() -> Self {
        LexerConfig {
            keywords: HashMap::new(),
            operators: HashMap::new(),
            max_operator_len: 0,
            max_identifier_len: MAX_IDENTIFIER_LEN,
        }
    }

    pub fn with_keyword(mut self, name: &str, kind: TokenKind) -> Self {
        self.keywords.insert(name.to_string(), kind);
        self
    }

    pub fn without_keyword(mut self, name: &str) -> Self {
        self.keywords.remove(name);
        self
    }

    pub fn with_operator(mut self, text: &str, kind: TokenKind) -> Self {
        self.max_operator_len = self.max_operator_len.max(text.len());
        self.operators.insert(text.to_string(), kind);
        self
    }

    pub fn without_operator(mut self, text: &str) -> Self {
        self.operators.remove(text);
        self.max_operator_len = self.operators.keys().map(String::len).max().unwrap_or(0);
        self
    }

    pub fn with_max_identifier_len(mut self, len: usize) -> Self {
        self.max_identifier_len = len;
        self
    }

    pub fn keyword(&self, name: &str) -> Option<TokenKind> {
        self.keywords.get(name).copied()
    }

    /// Longest operator that is a prefix of `text`, with its length.
    ///
    /// Candidates are tried from the longest possible length down to one byte.
    pub fn longest_operator(&self, text: &[u8]) -> Option<(TokenKind, usize)> {
        let longest = self.max_operator_len.min(text.len());

        for len in (1..=longest).rev() {
            let Ok(candidate) = std::str::from_utf8(&text[..len]) else {
                continue;
            };
            if let Some(kind) = self.operators.get(candidate) {
                return Some((*kind, len));
            }
        }

        None
    }
}
