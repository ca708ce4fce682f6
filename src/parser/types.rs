//! Type parsing implementation.
//!
//! Types are a single atom with an optional `const` qualifier:
//!
//! ```text
//! type := 'const'? ('int' | 'float' | 'double' | 'byte' | 'boolean')
//! ```

use crate::{
    ast::{
        ast::{Node, NodeKind, TypeAtom, TypeInfo},
        ids::NodeId,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    MK_NODE,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.get_position();

    let is_const = parser.current_token_kind() == TokenKind::Const;
    if is_const {
        parser.advance();
    }

    let token_kind = parser.current_token_kind();
    let Some(atom) = TypeAtom::from_token(token_kind) else {
        parser.report(
            ErrorImpl::ExpectedType { found: token_kind },
            parser.get_position(),
        );
        parser.advance();
        return None;
    };
    parser.advance();

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::Type(TypeInfo { atom, is_const })
    ))
}
