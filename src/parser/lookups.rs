use std::collections::HashMap;

use crate::{ast::ids::NodeId, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Relational,
    Additive,
    Multiplicative,
}

pub type DeclHandler = fn(&mut Parser) -> Option<NodeId>;
pub type StmtHandler = fn(&mut Parser) -> Option<NodeId>;
pub type NUDHandler = fn(&mut Parser) -> Option<NodeId>;
pub type LEDHandler = fn(&mut Parser, NodeId, BindingPower) -> Option<NodeId>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Relational
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Literals and symbols
    parser.nud(TokenKind::IntConst, parse_primary_expr);
    parser.nud(TokenKind::FloatConst, parse_primary_expr);
    parser.nud(TokenKind::CharConst, parse_primary_expr);
    parser.nud(TokenKind::StringConst, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);

    // Prefix
    parser.nud(TokenKind::PlusPlus, parse_prefix_expr);
    parser.nud(TokenKind::MinusMinus, parse_prefix_expr);
    parser.nud(TokenKind::Star, parse_prefix_expr);
    parser.nud(TokenKind::Ampersand, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Identifier, parse_identifier_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Break, parse_loop_control_stmt);
    parser.stmt(TokenKind::Continue, parse_loop_control_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);

    // Top level
    parser.decl(TokenKind::Identifier, parse_identifier_stmt);
    parser.decl(TokenKind::Pound, parse_foreign_import);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
