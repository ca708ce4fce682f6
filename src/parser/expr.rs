use crate::{
    ast::{
        ast::{
            BinaryExpression, BinaryOperator, FunctionCall, Ident, Node, NodeKind, PostfixOperator,
            PrimaryExpression, PrimaryValue, UnaryExpression, UnaryOperator,
        },
        ids::NodeId,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{TokenKind, TokenValue},
    MK_NODE,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose operators all bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<NodeId> {
    let mut left = parse_unary_expr(parser)?;
    // Every fold deepens the left operand by one level
    let mut folds = 0;

    // While the next operator binds tighter than the caller, fold it into lhs
    let result = loop {
        let token_kind = parser.current_token_kind();
        let Some(&next_bp) = parser.get_bp_lookup().get(&token_kind) else {
            break Some(left);
        };
        if next_bp <= bp {
            break Some(left);
        }

        let Some(&led) = parser.get_led_lookup().get(&token_kind) else {
            break Some(left);
        };
        if !parser.enter_expr() {
            break None;
        }
        folds += 1;

        match led(parser, left, next_bp) {
            Some(folded) => left = folded,
            None => break None,
        }
    };

    parser.exit_expr(folds);
    result
}

/// Parses a prefix, grouping or primary expression.
pub fn parse_unary_expr(parser: &mut Parser) -> Option<NodeId> {
    if !parser.enter_expr() {
        return None;
    }

    let expr = parse_nud(parser);
    parser.exit_expr(1);
    expr
}

fn parse_nud(parser: &mut Parser) -> Option<NodeId> {
    let token_kind = parser.current_token_kind();
    let Some(&nud) = parser.get_nud_lookup().get(&token_kind) else {
        parser.report(
            ErrorImpl::ExpectedExpression { found: token_kind },
            parser.get_position(),
        );
        // Terminators belong to the enclosing production
        if !matches!(
            token_kind,
            TokenKind::Semicolon | TokenKind::CloseParen | TokenKind::CloseCurly | TokenKind::Comma
        ) {
            parser.advance();
        }
        return None;
    };

    nud(parser)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.get_position();

    let value = match parser.current_token_kind() {
        TokenKind::Identifier if parser.peek_kind(1) == TokenKind::OpenParen => {
            PrimaryValue::Call(parse_call(parser, false)?)
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            let name = token.identifier().unwrap_or_default().to_string();
            parser.resolve_identifier(&name, position.clone());
            PrimaryValue::Identifier(MK_NODE!(
                parser,
                position.clone(),
                NodeKind::Ident(Ident { name })
            ))
        }
        _ => {
            let token = parser.advance();
            match token.value {
                TokenValue::Int(value) => PrimaryValue::Int(value),
                TokenValue::Float(value) => PrimaryValue::Float(value),
                TokenValue::Char(value) => PrimaryValue::Char(value),
                TokenValue::String(value) => PrimaryValue::String(value),
                _ => {
                    parser.report(ErrorImpl::ExpectedExpression { found: token.kind }, position);
                    return None;
                }
            }
        }
    };

    let postfix = match parser.current_token_kind() {
        TokenKind::PlusPlus => Some(PostfixOperator::Increment),
        TokenKind::MinusMinus => Some(PostfixOperator::Decrement),
        _ => None,
    };
    if postfix.is_some() {
        parser.advance();
    }

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::PrimaryExpression(PrimaryExpression { value, postfix })
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<NodeId> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::PlusPlus => UnaryOperator::Increment,
        TokenKind::MinusMinus => UnaryOperator::Decrement,
        TokenKind::Star => UnaryOperator::Deref,
        TokenKind::Ampersand => UnaryOperator::AddressOf,
        _ => UnaryOperator::Negate,
    };

    let operand = parse_unary_expr(parser)?;

    Some(MK_NODE!(
        parser,
        operator_token.position,
        NodeKind::UnaryExpression(UnaryExpression { operator, operand })
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.advance().position;
    let operand = parse_expr(parser, BindingPower::Default)?;
    parser.expect_closing(TokenKind::CloseParen);

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::UnaryExpression(UnaryExpression {
            operator: UnaryOperator::Nested,
            operand,
        })
    ))
}

pub fn parse_binary_expr(parser: &mut Parser, left: NodeId, bp: BindingPower) -> Option<NodeId> {
    let operator_token = parser.advance();
    let operator = BinaryOperator::from_token(operator_token.kind)?;

    let right = parse_expr(parser, bp)?;
    let position = parser.node(left).position.clone();

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::BinaryExpression(BinaryExpression {
            operator,
            left,
            right,
        })
    ))
}

/// Parses `IDENT '(' arguments ')'`.
///
/// Only a call written as its own statement directly in the translation unit
/// is a directive call.
pub fn parse_call(parser: &mut Parser, is_statement: bool) -> Option<NodeId> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    let position = name_token.position.clone();
    let name = name_token.identifier().unwrap_or_default().to_string();

    parser.resolve_function(&name, position.clone());
    let callee = MK_NODE!(parser, position.clone(), NodeKind::Ident(Ident { name }));

    parser.expect(TokenKind::OpenParen);

    let mut arguments = vec![];
    let mut complete = true;
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            match parse_expr(parser, BindingPower::Default) {
                Some(argument) => arguments.push(argument),
                None => complete = false,
            }

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                continue;
            }
            break;
        }
    }

    // A failed argument has been reported already
    if complete || parser.current_token_kind() == TokenKind::CloseParen {
        parser.expect_closing(TokenKind::CloseParen);
    }
    if !complete {
        return None;
    }

    let is_directive_call = is_statement && parser.at_root();

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::FunctionCall(FunctionCall {
            callee,
            arguments,
            is_directive_call,
        })
    ))
}
