use crate::{
    ast::{
        ast::{
            ControlFlow, ControlFlowKind, Declaration, FunctionDefinition, FunctionOrigin, Ident,
            Node, NodeKind, Parameter, Statement, StatementKind,
        },
        ids::{NodeId, ScopeId},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    scope::symbols::EntryKind,
    MK_NODE,
};

use super::{expr::parse_call, parser::Parser, types::parse_type};

/// Parses one top-level declaration.
pub fn parse_declaration(parser: &mut Parser) -> Option<NodeId> {
    let token_kind = parser.current_token_kind();
    if let Some(&handler) = parser.get_decl_lookup().get(&token_kind) {
        return handler(parser);
    }

    parser.report(
        ErrorImpl::ExpectedDeclaration { found: token_kind },
        parser.get_position(),
    );
    parser.advance();
    None
}

/// Parses one statement inside a block.
pub fn parse_stmt(parser: &mut Parser) -> Option<NodeId> {
    let token_kind = parser.current_token_kind();
    if let Some(&handler) = parser.get_stmt_lookup().get(&token_kind) {
        return handler(parser);
    }

    parser.report(
        ErrorImpl::ExpectedStatement { found: token_kind },
        parser.get_position(),
    );
    parser.advance();
    None
}

/// Statements led by an identifier: a call, a function definition or a
/// variable declaration/assignment.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Option<NodeId> {
    match (parser.peek_kind(1), parser.peek_kind(2)) {
        (TokenKind::OpenParen, _) => {
            let call = parse_call(parser, true);
            parser.expect(TokenKind::Semicolon);
            call
        }
        (TokenKind::Colon, TokenKind::OpenParen) => parse_fn_def(parser),
        _ => {
            let declaration = parse_var_decl(parser);
            parser.expect(TokenKind::Semicolon);
            declaration
        }
    }
}

/// `IDENT (':' type)? ('=' expression)*`
///
/// With a type this declares the name in the current scope; without one it
/// assigns to a name that must already be visible.
pub fn parse_var_decl(parser: &mut Parser) -> Option<NodeId> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    let position = name_token.position.clone();
    let name = name_token.identifier().unwrap_or_default().to_string();

    let mut type_info = None;
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        type_info = parse_type(parser);
        parser.declare(&name, EntryKind::Declaration, position.clone());
    } else {
        parser.resolve_identifier(&name, position.clone());
    }

    let id = MK_NODE!(parser, position.clone(), NodeKind::Ident(Ident { name }));

    let mut initializers = vec![];
    while parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        if let Some(initializer) = parse_expr(parser, BindingPower::Default) {
            initializers.push(initializer);
        }
    }

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::Declaration(Declaration {
            type_info,
            id,
            initializers,
        })
    ))
}

/// `'(' (IDENT ':' type (',' IDENT ':' type)*)? ')'`, declared in the current scope.
fn parse_parameters(parser: &mut Parser) -> Vec<Parameter> {
    let mut parameters = vec![];
    parser.expect(TokenKind::OpenParen);

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let name_token = parser.expect(TokenKind::Identifier);
            parser.expect(TokenKind::Colon);
            let type_info = parse_type(parser);

            if let (Some(name_token), Some(type_info)) = (name_token, type_info) {
                let position = name_token.position.clone();
                let name = name_token.identifier().unwrap_or_default().to_string();

                parser.declare(&name, EntryKind::Declaration, position.clone());
                let name = MK_NODE!(parser, position, NodeKind::Ident(Ident { name }));
                parameters.push(Parameter { name, type_info });
            }

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
                continue;
            }
            break;
        }
    }

    parser.expect(TokenKind::CloseParen);
    parameters
}

/// Parses `IDENT ':' '(' params ')' ('->' type)?` and opens the function's
/// scope, holding the parameters. The caller closes it.
fn parse_signature(parser: &mut Parser) -> Option<(NodeId, Vec<Parameter>, Option<NodeId>, ScopeId)> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    let position = name_token.position.clone();
    let name = name_token.identifier().unwrap_or_default().to_string();

    // Bound before the body so the function can call itself
    parser.declare(&name, EntryKind::Function, position.clone());
    let id = MK_NODE!(parser, position.clone(), NodeKind::Ident(Ident { name }));

    parser.expect(TokenKind::Colon);

    let scope = parser.enter_scope(position);
    let parameters = parse_parameters(parser);

    let mut return_type = None;
    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        return_type = parse_type(parser);
    }

    Some((id, parameters, return_type, scope))
}

pub fn parse_fn_def(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.get_position();

    if !parser.at_root() {
        let name = parser.current_token().identifier().unwrap_or_default().to_string();
        parser.report(ErrorImpl::NestedFunction { name }, position.clone());
    }

    let (id, parameters, return_type, body) = parse_signature(parser)?;

    let loop_depth = parser.loop_depth();
    parser.set_loop_depth(0);
    parse_block_body(parser);
    parser.set_loop_depth(loop_depth);
    parser.exit_scope();

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::FunctionDefinition(FunctionDefinition {
            id,
            return_type,
            parameters,
            body,
            origin: FunctionOrigin::Local,
        })
    ))
}

/// `'#' 'foreign' 'from' '(' IDENT ',' signature ')' ';'`
pub fn parse_foreign_import(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.advance().position;

    parser.expect(TokenKind::Foreign);
    parser.expect(TokenKind::From);
    parser.expect(TokenKind::OpenParen);

    let module = parser
        .expect(TokenKind::Identifier)
        .and_then(|token| token.identifier().map(String::from))
        .unwrap_or_default();
    parser.add_foreign_module(&module);

    parser.expect(TokenKind::Comma);

    let signature = parse_signature(parser);
    if signature.is_some() {
        parser.exit_scope();
    }

    parser.expect(TokenKind::CloseParen);
    parser.expect(TokenKind::Semicolon);

    let (id, parameters, return_type, body) = signature?;

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::FunctionDefinition(FunctionDefinition {
            id,
            return_type,
            parameters,
            body,
            origin: FunctionOrigin::Foreign(module),
        })
    ))
}

/// Parses `'{' statement* '}'` into the current scope.
fn parse_block_body(parser: &mut Parser) {
    parser.expect(TokenKind::OpenCurly);

    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        if let Some(statement) = parse_stmt(parser) {
            parser.add_statement(statement);
        }
    }

    parser.expect(TokenKind::CloseCurly);
}

/// Parses a block in a fresh scope nested in the current one.
pub fn parse_block(parser: &mut Parser) -> ScopeId {
    let scope = parser.enter_scope(parser.get_position());
    parse_block_body(parser);
    parser.exit_scope();
    scope
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.advance().position;

    let mut expr = None;
    if parser.current_token_kind() != TokenKind::Semicolon {
        expr = parse_expr(parser, BindingPower::Default);
    }

    parser.expect(TokenKind::Semicolon);

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::Statement(Statement {
            kind: StatementKind::Return,
            expr,
        })
    ))
}

/// `break ;` and `continue ;`, only valid inside a `while` body.
pub fn parse_loop_control_stmt(parser: &mut Parser) -> Option<NodeId> {
    let keyword = parser.advance();

    if parser.loop_depth() == 0 {
        parser.report(
            ErrorImpl::MisplacedLoopControl {
                keyword: keyword.kind,
            },
            keyword.position.clone(),
        );
    }

    parser.expect(TokenKind::Semicolon);

    let kind = if keyword.kind == TokenKind::Break {
        StatementKind::Break
    } else {
        StatementKind::Continue
    };

    Some(MK_NODE!(
        parser,
        keyword.position,
        NodeKind::Statement(Statement { kind, expr: None })
    ))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default);
    let body = parse_block(parser);
    let next = parse_else_clause(parser);

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::ControlFlow(ControlFlow {
            kind: ControlFlowKind::If,
            condition,
            body,
            next,
        })
    ))
}

/// Parses the `elif`/`else` clause following an `if` or `elif` body, if any.
fn parse_else_clause(parser: &mut Parser) -> Option<NodeId> {
    let kind = match parser.current_token_kind() {
        TokenKind::Elif => ControlFlowKind::Elif,
        TokenKind::Else => ControlFlowKind::Else,
        _ => return None,
    };
    let position = parser.advance().position;

    let (condition, body, next) = if kind == ControlFlowKind::Elif {
        let condition = parse_expr(parser, BindingPower::Default);
        let body = parse_block(parser);
        (condition, body, parse_else_clause(parser))
    } else {
        (None, parse_block(parser), None)
    };

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::ControlFlow(ControlFlow {
            kind,
            condition,
            body,
            next,
        })
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Option<NodeId> {
    let position = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default);

    parser.set_loop_depth(parser.loop_depth() + 1);
    let body = parse_block(parser);
    parser.set_loop_depth(parser.loop_depth() - 1);

    Some(MK_NODE!(
        parser,
        position,
        NodeKind::ControlFlow(ControlFlow {
            kind: ControlFlowKind::While,
            condition,
            body,
            next: None,
        })
    ))
}
