use std::fmt::Display;

use crate::Position;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    IntConst,
    FloatConst,
    CharConst,
    StringConst,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Not,        // !
    Less,
    Greater,
    Colon,
    Semicolon,
    Comma,
    Dot,
    Pound,
    Caret,
    Ampersand,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    /// Any other single character, emitted as-is so the parser can report it.
    Other(char),

    // Multi-character operators
    ColonAssign,   // :=
    LessEquals,    // <=
    GreaterEquals, // >=
    NotEquals,     // !=
    Equals,        // ==
    PlusPlus,      // ++
    MinusMinus,    // --
    Arrow,         // ->

    // Reserved
    If,
    Elif,
    Else,
    While,
    Break,
    Continue,
    Return,
    Const,
    Int,
    Float,
    Double,
    Byte,
    Boolean,
    Foreign,
    From,
}

impl TokenKind {
    /// Maps a single byte to its punctuation kind.
    pub fn from_punctuation(byte: u8) -> TokenKind {
        match byte {
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b'{' => TokenKind::OpenCurly,
            b'}' => TokenKind::CloseCurly,
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            b'=' => TokenKind::Assignment,
            b'!' => TokenKind::Not,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b':' => TokenKind::Colon,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'#' => TokenKind::Pound,
            b'^' => TokenKind::Caret,
            b'&' => TokenKind::Ampersand,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Dash,
            b'/' => TokenKind::Slash,
            b'*' => TokenKind::Star,
            b'%' => TokenKind::Percent,
            other => TokenKind::Other(other as char),
        }
    }

    /// Source spelling of the kind, or a description for literal kinds.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of stream",
            TokenKind::IntConst => "integer constant",
            TokenKind::FloatConst => "float constant",
            TokenKind::CharConst => "character constant",
            TokenKind::StringConst => "string constant",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Not => "!",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Pound => "#",
            TokenKind::Caret => "^",
            TokenKind::Ampersand => "&",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Other(_) => "character",
            TokenKind::ColonAssign => ":=",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::NotEquals => "!=",
            TokenKind::Equals => "==",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Arrow => "->",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Const => "const",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Double => "double",
            TokenKind::Byte => "byte",
            TokenKind::Boolean => "boolean",
            TokenKind::Foreign => "foreign",
            TokenKind::From => "from",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Other(c) => write!(f, "{}", c.escape_default()),
            _ => write!(f, "{}", self.describe()),
        }
    }
}

/// Literal payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Int(i64),
    Float(f64),
    Char(u8),
    Identifier(String),
    /// Raw bytes; escapes are already decoded and need not form valid UTF-8
    String(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            TokenValue::Int(value) => write!(f, "{}", value),
            TokenValue::Float(value) => write!(f, "{}", value),
            TokenValue::Char(value) => write!(f, "'{}'", (*value as char).escape_default()),
            TokenValue::Identifier(name) => write!(f, "{}", name),
            TokenValue::String(value) => write!(f, "\"{}\"", value.escape_ascii()),
        }
    }
}

impl Token {
    /// Name carried by an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn log(&self) {
        tracing::info!(
            "token: '{}', kind: {:?}, line: {}, column: {}",
            self,
            self.kind,
            self.position.line,
            self.position.column
        );
    }
}
