//! Basic token tests for the Clam scanner.

use std::sync::Arc;

use clam_parser::{scan_all, Position, Source, Token, TokenKind};

fn scan(source: &str) -> Vec<Token> {
    scan_all(&Arc::new(Source::new("test", source))).unwrap()
}

fn assert_tokens(source: &str, expected: Vec<TokenKind>) {
    let actual: Vec<TokenKind> = scan(source).iter().map(|t| t.kind).collect();
    assert_eq!(actual, expected, "Token mismatch for {source:?}");
}

// Keywords tests
#[test]
fn test_keywords_declarations() {
    assert_tokens("class fun var", vec![TokenKind::Class, TokenKind::Fun, TokenKind::Var]);
}

#[test]
fn test_keywords_control_flow() {
    assert_tokens(
        "if else for while return print",
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Print,
        ],
    );
}

#[test]
fn test_keywords_values() {
    assert_tokens(
        "true false nil this super and or",
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Nil,
            TokenKind::This,
            TokenKind::Super,
            TokenKind::And,
            TokenKind::Or,
        ],
    );
}

#[test]
fn test_keyword_prefixes_are_identifiers() {
    assert_tokens(
        "classes fund variable iffy orchid",
        vec![TokenKind::Identifier; 5],
    );
}

// Operators tests
#[test]
fn test_single_character_punctuators() {
    assert_tokens(
        "( ) { } , . - + ; / *",
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Minus,
            TokenKind::Plus,
            TokenKind::Semicolon,
            TokenKind::Slash,
            TokenKind::Star,
        ],
    );
}

#[test]
fn test_two_character_operators() {
    assert_tokens(
        "!= == >= <=",
        vec![
            TokenKind::BangEqual,
            TokenKind::EqualEqual,
            TokenKind::GreaterEqual,
            TokenKind::LessEqual,
        ],
    );
}

#[test]
fn test_operators_without_continuation() {
    assert_tokens(
        "! = > <",
        vec![TokenKind::Bang, TokenKind::Equal, TokenKind::Greater, TokenKind::Less],
    );
}

#[test]
fn test_longest_match_without_spaces() {
    assert_tokens(
        "a>=b==!c",
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterEqual,
            TokenKind::Identifier,
            TokenKind::EqualEqual,
            TokenKind::Bang,
            TokenKind::Identifier,
        ],
    );
}

// Literals tests
#[test]
fn test_numbers() {
    let tokens = scan("0 42 3.14 7.");
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["0", "42", "3.14", "7", "."]);
    assert_eq!(tokens[4].kind, TokenKind::Dot);
}

#[test]
fn test_number_followed_by_method_call() {
    assert_tokens(
        "1.abs",
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Identifier],
    );
}

#[test]
fn test_strings_keep_quotes_and_newlines() {
    let tokens = scan("\"hello\" \"two\nlines\"");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[1].lexeme, "\"two\nlines\"");
    assert_eq!(tokens[1].position, Position::new(8, 18));
}

#[test]
fn test_identifiers() {
    let tokens = scan("_private camelCase snake_case x1");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[3].lexeme, "x1");
}

// Trivia tests
#[test]
fn test_comments_and_whitespace_skipped() {
    assert_tokens(
        "// leading comment\r\n\tprint 1; // trailing\n",
        vec![TokenKind::Print, TokenKind::Number, TokenKind::Semicolon],
    );
}

#[test]
fn test_comment_at_end_of_input() {
    assert_tokens("x // no newline", vec![TokenKind::Identifier]);
}

// Position tests
#[test]
fn test_positions_are_inclusive() {
    let tokens = scan("var answer = 42;");
    let positions: Vec<Position> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(0, 2),
            Position::new(4, 9),
            Position::at(11),
            Position::new(13, 14),
            Position::at(15),
        ]
    );
}

#[test]
fn test_positions_count_line_breaks() {
    let tokens = scan("a\nbb\r\nc");
    // Carriage returns are stripped before scanning
    assert_eq!(tokens[1].position, Position::new(2, 3));
    assert_eq!(tokens[2].position, Position::at(5));
}

// Error tests
#[test]
fn test_unterminated_string() {
    let source = Arc::new(Source::new("test", "print \"abc"));
    let error = scan_all(&source).unwrap_err();
    assert_eq!(error.message(), "unterminated string");
    assert_eq!(error.position(), Some(Position::new(6, 9)));
}

#[test]
fn test_unrecognized_character() {
    let source = Arc::new(Source::new("test", "var x = 1 @ 2;"));
    let error = scan_all(&source).unwrap_err();
    assert_eq!(error.message(), "unrecognized token '@'");
    assert_eq!(error.position(), Some(Position::at(10)));
}

#[test]
fn test_first_error_stops_scanning() {
    let source = Arc::new(Source::new("test", "# \"unterminated"));
    let error = scan_all(&source).unwrap_err();
    assert_eq!(error.message(), "unrecognized token '#'");
}
