//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric, character and string literals
//! - Operators, longest-match splitting and punctuation
//! - Single-line and nested multi-line comments
//! - Positions
//! - Error cases

use std::rc::Rc;

use super::{
    config::LexerConfig,
    lexer::tokenize,
    tokens::{Token, TokenKind, TokenValue},
};
use crate::errors::errors::ErrorClass;

fn lex(source: &str) -> Vec<Token> {
    tokenize(
        source.as_bytes(),
        Rc::new("test.sc".to_string()),
        &LexerConfig::default(),
    )
    .unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "if elif else while break continue return const int float double byte boolean foreign from";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::If,
            TokenKind::Elif,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::Return,
            TokenKind::Const,
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Double,
            TokenKind::Byte,
            TokenKind::Boolean,
            TokenKind::Foreign,
            TokenKind::From,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo bar baz_123 _underscore CamelCase iffy");

    let names: Vec<&str> = tokens.iter().filter_map(|token| token.identifier()).collect();
    assert_eq!(names, vec!["foo", "bar", "baz_123", "_underscore", "CamelCase", "iffy"]);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = lex("42 0 3.14 7.");

    assert_eq!(tokens[0].value, TokenValue::Int(42));
    assert_eq!(tokens[1].value, TokenValue::Int(0));
    assert_eq!(tokens[2].kind, TokenKind::FloatConst);
    assert_eq!(tokens[2].value, TokenValue::Float(3.14));
    // A dot not followed by a digit ends the number
    assert_eq!(tokens[3].value, TokenValue::Int(7));
    assert_eq!(tokens[4].kind, TokenKind::Dot);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_letter_terminates_number_but_digit_extends_identifier() {
    let tokens = lex("12ab ab12");

    assert_eq!(tokens[0].value, TokenValue::Int(12));
    assert_eq!(tokens[1].identifier(), Some("ab"));
    assert_eq!(tokens[2].identifier(), Some("ab12"));
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_number_out_of_range() {
    let result = tokenize(
        b"x: int = 99999999999999999999;",
        Rc::new("test.sc".to_string()),
        &LexerConfig::default(),
    );

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(error.class(), ErrorClass::Lexical);
}

#[test]
fn test_tokenize_char_literals() {
    let tokens = lex(r"'a' '\n' 'x'");

    assert_eq!(tokens[0].kind, TokenKind::CharConst);
    assert_eq!(tokens[0].value, TokenValue::Char(b'a'));
    assert_eq!(tokens[1].value, TokenValue::Char(b'\n'));
    assert_eq!(tokens[2].value, TokenValue::Char(b'x'));
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_char_literal_inside_call() {
    assert_eq!(
        kinds("put('a');"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CharConst,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_unterminated_char_literal() {
    for source in ["'", "'a", "x = 'ab';", "'\n'"] {
        let error = tokenize(
            source.as_bytes(),
            Rc::new("test.sc".to_string()),
            &LexerConfig::default(),
        )
        .unwrap_err();

        assert_eq!(error.get_error_name(), "UnterminatedCharLiteral", "source: {:?}", source);
    }
}

#[test]
fn test_tokenize_strings() {
    let tokens = lex(r#""hello" "tab\there" "quote\"d" "hex\x41""#);

    assert_eq!(tokens[0].kind, TokenKind::StringConst);
    assert_eq!(tokens[0].value, TokenValue::String(b"hello".to_vec()));
    assert_eq!(tokens[1].value, TokenValue::String(b"tab\there".to_vec()));
    assert_eq!(tokens[2].value, TokenValue::String(b"quote\"d".to_vec()));
    assert_eq!(tokens[3].value, TokenValue::String(b"hexA".to_vec()));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_high_bytes() {
    let tokens = tokenize(
        b"\"\\xff\" \"caf\xe9\"",
        Rc::new("test.sc".to_string()),
        &LexerConfig::default(),
    )
    .unwrap();

    assert_eq!(tokens[0].value, TokenValue::String(vec![0xff]));
    assert_eq!(tokens[1].value, TokenValue::String(vec![b'c', b'a', b'f', 0xe9]));
    assert_eq!(tokens[0].to_string(), "\"\\xff\"");
}

#[test]
fn test_unterminated_string_literal() {
    let error = tokenize(
        b"s = \"never closed",
        Rc::new("test.sc".to_string()),
        &LexerConfig::default(),
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedStringLiteral");
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >= = ++ -- -> :="),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Arrow,
            TokenKind::ColonAssign,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; : # ^ & !"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Pound,
            TokenKind::Caret,
            TokenKind::Ampersand,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_unknown_characters_are_single_tokens() {
    assert_eq!(
        kinds("a @ $b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Other('@'),
            TokenKind::Other('$'),
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_colon_assign_is_one_token() {
    assert_eq!(
        kinds("x := 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::ColonAssign,
            TokenKind::IntConst,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_colon_assign_without_operator_entry() {
    let config = LexerConfig::default().without_operator(":=");
    let tokens = tokenize(b"x := 1", Rc::new("test.sc".to_string()), &config).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Assignment,
            TokenKind::IntConst,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_longest_match_rescans_suffix() {
    // `:=:` splits into `:=` then `:`, `<==` into `<=` then `=`
    assert_eq!(
        kinds("a:=:b<==c"),
        vec![
            TokenKind::Identifier,
            TokenKind::ColonAssign,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Assignment,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_symbol_run_columns() {
    let tokens = lex("x:=(");

    assert_eq!(tokens[1].kind, TokenKind::ColonAssign);
    assert_eq!(tokens[1].position.column, 2);
    assert_eq!(tokens[2].kind, TokenKind::OpenParen);
    assert_eq!(tokens[2].position.column, 4);
}

#[test]
fn test_custom_keyword_table() {
    let config = LexerConfig::default()
        .without_keyword("while")
        .with_keyword("loop", TokenKind::While);
    let tokens = tokenize(b"while loop", Rc::new("test.sc".to_string()), &config).unwrap();

    assert_eq!(tokens[0].identifier(), Some("while"));
    assert_eq!(tokens[1].kind, TokenKind::While);
}

#[test]
fn test_tokenize_single_line_comments() {
    let tokens = lex("x = 5 // this is a comment\ny = 10");

    assert_eq!(tokens[0].identifier(), Some("x"));
    assert_eq!(tokens[1].kind, TokenKind::Assignment);
    assert_eq!(tokens[2].value, TokenValue::Int(5));
    assert_eq!(tokens[3].identifier(), Some("y"));
    assert_eq!(tokens[3].position.line, 2);
    assert_eq!(tokens[4].kind, TokenKind::Assignment);
    assert_eq!(tokens[5].value, TokenValue::Int(10));
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_comment_directly_after_symbol() {
    assert_eq!(
        kinds("a+// trailing\nb"),
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nested_comment_produces_no_tokens() {
    let tokens = lex("{- {- inner -} still -}");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_nested_comment_between_tokens() {
    let tokens = lex("a {- one {- two\n -} three -} b");

    assert_eq!(tokens[0].identifier(), Some("a"));
    assert_eq!(tokens[1].identifier(), Some("b"));
    assert_eq!(tokens[1].position.line, 2);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_unterminated_nested_comment() {
    let error = tokenize(
        b"a\n  {- {- inner -} never closed",
        Rc::new("test.sc".to_string()),
        &LexerConfig::default(),
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedComment");
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_comment_close_outside_comment_is_punctuation() {
    assert_eq!(
        kinds("a -} b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::CloseCurly,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_positions() {
    let tokens = lex("foo: int = 1;\n  bar(x);");

    assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
    assert_eq!((tokens[1].position.line, tokens[1].position.column), (1, 4));
    assert_eq!((tokens[2].position.line, tokens[2].position.column), (1, 6));
    assert_eq!((tokens[4].position.line, tokens[4].position.column), (1, 12));
    assert_eq!((tokens[6].position.line, tokens[6].position.column), (2, 3));
    assert_eq!((tokens[7].position.line, tokens[7].position.column), (2, 6));
    assert_eq!(tokens[0].position.file.as_str(), "test.sc");
}

#[test]
fn test_identifier_length_limit() {
    let config = LexerConfig::default().with_max_identifier_len(4);

    assert!(tokenize(b"abcd", Rc::new("test.sc".to_string()), &config).is_ok());

    let error = tokenize(b"abcde", Rc::new("test.sc".to_string()), &config).unwrap_err();
    assert_eq!(error.get_error_name(), "IdentifierTooLong");
}

#[test]
fn test_tokenize_simple_program() {
    let tokens = lex("x: int = 42;");

    assert_eq!(tokens.len(), 7); // x, :, int, =, 42, ;, EOF
    assert_eq!(tokens[0].identifier(), Some("x"));
    assert_eq!(tokens[1].kind, TokenKind::Colon);
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[3].kind, TokenKind::Assignment);
    assert_eq!(tokens[4].value, TokenValue::Int(42));
    assert_eq!(tokens[5].kind, TokenKind::Semicolon);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_function_definition() {
    assert_eq!(
        kinds("foo: (a: int) -> int { return a; }"),
        vec![
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Int,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::Int,
            TokenKind::OpenCurly,
            TokenKind::Return,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_empty_source() {
    let tokens = lex("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
}
