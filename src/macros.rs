//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_NODE!` - Allocates a node in the syntax tree arena
//!
//! These macros reduce boilerplate in the lexer and parser.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's payload (a `TokenValue`)
/// * `$position` - Position of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntConst, TokenValue::Int(42), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        Token {
            kind: $kind,
            value: $value,
            position: $position,
        }
    };
}

/// Allocates a node in the parser's arena and yields its `NodeId`.
///
/// # Example
///
/// ```ignore
/// let id = MK_NODE!(parser, position, NodeKind::Ident(Ident { name }));
/// ```
#[macro_export]
macro_rules! MK_NODE {
    ($parser:expr, $position:expr, $kind:expr) => {
        $parser.alloc_node(Node {
            position: $position,
            kind: $kind,
        })
    };
}
