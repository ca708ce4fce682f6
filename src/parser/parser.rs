//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry point.
//! Declarations and statements are dispatched through lookup tables keyed by
//! the leading token; binary expressions use binding powers for precedence.
//!
//! Names are bound while parsing: every block pushes a scope, declarations go
//! into the current scope and identifiers are resolved outwards through parents.
//! Errors never stop the parse; they are collected and handed back with the tree.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{
        arena::Arena,
        ast::{Ast, Node, TranslationUnit},
        ids::{NodeId, ScopeId},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenValue},
    scope::{
        scope::ScopeTree,
        symbols::{EntryKind, SymTable},
    },
    Position, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_declaration,
};

/// Deepest expression nesting accepted before `ExpressionTooDeep` is reported.
pub const MAX_EXPR_DEPTH: u32 = 256;

/// The main parser structure that maintains parsing state.
///
/// Besides the token cursor it owns the node and scope arenas of the tree
/// being built and the errors reported so far.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,

    nodes: Arena<NodeId, Node>,
    scopes: ScopeTree,
    root_scope: ScopeId,
    current_scope: ScopeId,
    foreign_modules: SymTable,
    errors: Vec<Error>,
    /// Number of `while` bodies enclosing the current statement
    loop_depth: u32,
    /// Nesting of the expression being parsed, counting operands and operators
    expr_depth: u32,

    /// Lookup table for top-level declaration handlers
    decl_lookup: DeclLookup,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix and primary) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance with an empty root scope.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let position = tokens
                .last()
                .map(|token| token.position.clone())
                .unwrap_or_else(|| Position::new(1, 1, Rc::clone(&file)));
            tokens.push(MK_TOKEN!(TokenKind::EOF, TokenValue::None, position));
        }

        let mut scopes = ScopeTree::new();
        let root_scope = scopes.push(None, tokens[0].position.clone());

        Parser {
            tokens,
            pos: 0,
            file,
            nodes: Arena::new(),
            scopes,
            root_scope,
            current_scope: root_scope,
            foreign_modules: SymTable::new(),
            errors: vec![],
            loop_depth: 0,
            expr_depth: 0,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Kind of the token `offset` places ahead, `EOF` past the end.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of the expected kind.
    ///
    /// On a mismatch an `UnexpectedToken` error is recorded and the offending
    /// token is skipped, so the caller can carry on with its production.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Option<Token> {
        let kind = self.current_token_kind();
        if kind == expected_kind {
            return Some(self.advance());
        }

        self.report(
            ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                found: kind,
            },
            self.get_position(),
        );
        self.advance();
        None
    }

    /// Like `expect`, but a `;` or `}` is left in place for the enclosing
    /// statement or block.
    pub fn expect_closing(&mut self, expected_kind: TokenKind) -> Option<Token> {
        let kind = self.current_token_kind();
        if kind != expected_kind && matches!(kind, TokenKind::Semicolon | TokenKind::CloseCurly) {
            self.report(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: kind,
                },
                self.get_position(),
            );
            return None;
        }

        self.expect(expected_kind)
    }

    /// Records an error and keeps parsing.
    pub fn report(&mut self, error: ErrorImpl, position: Position) {
        let error = Error::new(error, position);
        tracing::debug!("parser: {}", error);
        self.errors.push(error);
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().position.clone()
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        self.nodes.alloc(node)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current_scope
    }

    pub fn root_scope(&self) -> ScopeId {
        self.root_scope
    }

    pub fn at_root(&self) -> bool {
        self.current_scope == self.root_scope
    }

    /// Opens a scope nested in the current one and makes it current.
    pub fn enter_scope(&mut self, position: Position) -> ScopeId {
        let scope = self.scopes.push(Some(self.current_scope), position);
        self.current_scope = scope;
        scope
    }

    /// Makes the parent of the current scope current again.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes.get(self.current_scope).parent {
            self.current_scope = parent;
        }
    }

    /// Appends a statement to the current scope.
    pub fn add_statement(&mut self, statement: NodeId) {
        let scope = self.current_scope;
        self.scopes.get_mut(scope).statements.push(statement);
    }

    /// Binds `name` in the current scope, reporting a redeclaration.
    pub fn declare(&mut self, name: &str, kind: EntryKind, position: Position) {
        let scope = self.current_scope;
        if let Err(error) = self.scopes.insert(scope, name, kind) {
            self.report(error, position);
        }
    }

    /// Resolves a variable through the scope chain.
    ///
    /// A name bound in an enclosing scope is recorded as a `Reference` in the
    /// current one, so each block's table lists the outer names it uses.
    pub fn resolve_identifier(&mut self, name: &str, position: Position) {
        let scope = self.current_scope;
        if self.scopes.lookup_local(scope, name).is_some() {
            return;
        }

        if self.scopes.lookup(scope, name).is_none() {
            self.report(
                ErrorImpl::UndeclaredIdentifier {
                    name: name.to_string(),
                },
                position,
            );
            return;
        }

        self.declare(name, EntryKind::Reference, position);
    }

    /// Resolves a call target. Only the translation unit's own names are
    /// callable, whatever scope the call appears in.
    pub fn resolve_function(&mut self, name: &str, position: Position) {
        let kind = self
            .scopes
            .lookup_local(self.root_scope, name)
            .map(|entry| entry.kind);

        match kind {
            None => self.report(
                ErrorImpl::UndeclaredFunction {
                    name: name.to_string(),
                },
                position,
            ),
            Some(EntryKind::Function) => {}
            Some(_) => self.report(
                ErrorImpl::NotCallable {
                    name: name.to_string(),
                },
                position,
            ),
        }
    }

    /// Records the module a foreign import comes from.
    pub fn add_foreign_module(&mut self, module: &str) {
        // Modules never bind, so a repeated import cannot fail
        let _ = self.foreign_modules.insert(module, EntryKind::Module);
    }

    pub fn loop_depth(&self) -> u32 {
        self.loop_depth
    }

    pub fn set_loop_depth(&mut self, depth: u32) {
        self.loop_depth = depth;
    }

    /// Enters one level of expression nesting.
    ///
    /// Past `MAX_EXPR_DEPTH` this reports `ExpressionTooDeep`, skips to the end
    /// of the statement and returns false.
    pub fn enter_expr(&mut self) -> bool {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            self.report(
                ErrorImpl::ExpressionTooDeep {
                    max: MAX_EXPR_DEPTH,
                },
                self.get_position(),
            );
            self.skip_to_statement_end();
            return false;
        }

        self.expr_depth += 1;
        true
    }

    pub fn exit_expr(&mut self, levels: u32) {
        self.expr_depth = self.expr_depth.saturating_sub(levels);
    }

    /// Skips up to, not past, the next `;` or `}`.
    pub fn skip_to_statement_end(&mut self) {
        while !matches!(
            self.current_token_kind(),
            TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF
        ) {
            self.advance();
        }
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix or primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a top-level declaration handler for a token.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Consumes the parser, yielding the tree and every error reported.
    pub fn finish(self) -> (Ast, Vec<Error>) {
        let root = TranslationUnit {
            position: self.scopes.get(self.root_scope).position.clone(),
            scope: self.root_scope,
            foreign_modules: self.foreign_modules,
        };

        (Ast::new(self.nodes, self.scopes, root), self.errors)
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses declarations until EOF. The tree
/// is returned even when errors were reported; callers decide whether to use it.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Ast, Vec<Error>) {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    while parser.has_tokens() {
        if let Some(declaration) = parse_declaration(&mut parser) {
            parser.add_statement(declaration);
        }
    }

    tracing::debug!(
        "parser: {} nodes, {} errors",
        parser.nodes.len(),
        parser.errors.len()
    );

    parser.finish()
}
