use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Compilation phase an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lexical,
    Syntax,
    Semantic,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn class(&self) -> ErrorClass {
        match &self.internal_error {
            ErrorImpl::UnterminatedCharLiteral
            | ErrorImpl::UnterminatedStringLiteral
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::IdentifierTooLong { .. } => ErrorClass::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::ExpectedType { .. }
            | ErrorImpl::ExpectedDeclaration { .. }
            | ErrorImpl::ExpectedStatement { .. }
            | ErrorImpl::ExpressionTooDeep { .. } => ErrorClass::Syntax,
            ErrorImpl::Redeclaration { .. }
            | ErrorImpl::UndeclaredIdentifier { .. }
            | ErrorImpl::UndeclaredFunction { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::MisplacedLoopControl { .. }
            | ErrorImpl::NestedFunction { .. } => ErrorClass::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedCharLiteral => "UnterminatedCharLiteral",
            ErrorImpl::UnterminatedStringLiteral => "UnterminatedStringLiteral",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::IdentifierTooLong { .. } => "IdentifierTooLong",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::ExpectedDeclaration { .. } => "ExpectedDeclaration",
            ErrorImpl::ExpectedStatement { .. } => "ExpectedStatement",
            ErrorImpl::ExpressionTooDeep { .. } => "ExpressionTooDeep",
            ErrorImpl::Redeclaration { .. } => "Redeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::UndeclaredFunction { .. } => "UndeclaredFunction",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::MisplacedLoopControl { .. } => "MisplacedLoopControl",
            ErrorImpl::NestedFunction { .. } => "NestedFunction",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedCharLiteral => ErrorTip::Suggestion(String::from(
                "Character literals take exactly one character between single quotes",
            )),
            ErrorImpl::UnterminatedStringLiteral => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnterminatedComment => ErrorTip::Suggestion(String::from(
                "Every `{-` needs a matching `-}` before the end of the file",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::IdentifierTooLong { length, max } => ErrorTip::Suggestion(format!(
                "Identifier is {} characters long, the limit is {}",
                length, max
            )),
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected `{}`, found `{}`",
                expected, found
            )),
            ErrorImpl::ExpectedExpression { found } => ErrorTip::Suggestion(format!(
                "Expected an expression, found `{}`",
                found
            )),
            ErrorImpl::ExpectedType { found } => ErrorTip::Suggestion(format!(
                "Expected one of `int`, `byte`, `float`, `double`, `boolean`, found `{}`",
                found
            )),
            ErrorImpl::ExpectedDeclaration { found } => ErrorTip::Suggestion(format!(
                "Expected a declaration, function or call at top level, found `{}`",
                found
            )),
            ErrorImpl::ExpectedStatement { found } => {
                ErrorTip::Suggestion(format!("Expected a statement, found `{}`", found))
            }
            ErrorImpl::ExpressionTooDeep { max } => ErrorTip::Suggestion(format!(
                "Expressions may nest at most {} levels, split this one into variables",
                max
            )),
            ErrorImpl::Redeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::UndeclaredIdentifier { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", name))
            }
            ErrorImpl::UndeclaredFunction { name } => ErrorTip::Suggestion(format!(
                "Function `{}` is not declared at top level",
                name
            )),
            ErrorImpl::NotCallable { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", name))
            }
            ErrorImpl::MisplacedLoopControl { keyword } => {
                ErrorTip::Suggestion(format!("`{}` can only be used inside `while`", keyword))
            }
            ErrorImpl::NestedFunction { name } => ErrorTip::Suggestion(format!(
                "Function `{}` must be defined at top level",
                name
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unterminated character literal")]
    UnterminatedCharLiteral,
    #[error("unterminated string literal")]
    UnterminatedStringLiteral,
    #[error("unterminated multi-line comment")]
    UnterminatedComment,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("identifier too long: {length} characters, limit {max}")]
    IdentifierTooLong { length: usize, max: usize },

    // Syntax
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("expected an expression, found `{found}`")]
    ExpectedExpression { found: TokenKind },
    #[error("expected a type, found `{found}`")]
    ExpectedType { found: TokenKind },
    #[error("expected a declaration, found `{found}`")]
    ExpectedDeclaration { found: TokenKind },
    #[error("expected a statement, found `{found}`")]
    ExpectedStatement { found: TokenKind },
    #[error("expression nested deeper than {max} levels")]
    ExpressionTooDeep { max: u32 },

    // Semantic
    #[error("redeclaration of {name:?}")]
    Redeclaration { name: String },
    #[error("undeclared identifier {name:?}")]
    UndeclaredIdentifier { name: String },
    #[error("undeclared function {name:?}")]
    UndeclaredFunction { name: String },
    #[error("{name:?} is not callable")]
    NotCallable { name: String },
    #[error("`{keyword}` outside of a loop")]
    MisplacedLoopControl { keyword: TokenKind },
    #[error("function {name:?} defined inside a block")]
    NestedFunction { name: String },
}
