//! Runs the front end over one source file.
//!
//! The lexer runs to completion first, then the parser. A tree is only handed
//! on when neither reported an error.

use std::{rc::Rc, time::Instant};

use crate::{
    ast::ast::Ast,
    errors::errors::Error,
    lexer::{
        config::LexerConfig,
        lexer::tokenize,
        tokens::Token,
    },
    parser::parser::parse,
};

/// Tokenizes `source`, logging the elapsed time.
pub fn lex_source(source: &[u8], file_name: &str, config: &LexerConfig) -> Result<Vec<Token>, Error> {
    let start = Instant::now();
    let tokens = tokenize(source, Rc::new(file_name.to_string()), config)?;

    tracing::info!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());

    Ok(tokens)
}

/// Parses `tokens`, returning every error found instead of the tree when
/// there is at least one.
pub fn parse_tokens(tokens: Vec<Token>, file_name: &str) -> Result<Ast, Vec<Error>> {
    let start = Instant::now();
    let (ast, errors) = parse(tokens, Rc::new(file_name.to_string()));
    tracing::info!("Parsed {} nodes in {:?}", ast.node_count(), start.elapsed());

    if !errors.is_empty() {
        tracing::debug!("refusing to continue with {} errors", errors.len());
        return Err(errors);
    }

    Ok(ast)
}

/// Lexes and parses `source`.
///
/// A lexical error stops the run before parsing, so it is always alone.
pub fn compile_source(source: &[u8], file_name: &str, config: &LexerConfig) -> Result<Ast, Vec<Error>> {
    let tokens = lex_source(source, file_name, config).map_err(|error| vec![error])?;
    parse_tokens(tokens, file_name)
}
