//! Property-based tests for the scanner and parser.
//!
//! 1. **Parser never panics**: arbitrary printable input yields a program or
//!    diagnostics that render.
//! 2. **Layout insensitivity**: whitespace and comments between tokens do
//!    not change the tree, nor the diagnostics of a broken program.
//! 3. **Unparse round trip**: printing a tree and parsing it again yields
//!    the same tree.
//! 4. **Lexical errors stop early**: one bad character gives exactly one
//!    diagnostic.
//! 5. **Token positions are ordered**: tokens never overlap and stay inside
//!    the source.
//! 6. **Parsing is deterministic**: the same input gives the same result.

use std::sync::Arc;

use proptest::prelude::*;

use clam_parser::ast::unparse;
use clam_parser::{parse, scan_all, Diagnostics, Source};

/// Well-formed declarations used to compose programs.
const FRAGMENTS: &[&str] = &[
    "var x = 1;",
    "var y;",
    "print x + 2 * 3;",
    "print \"hello\";",
    "fun add(a, b) { return a + b; }",
    "fun noop() {}",
    "if (x < 3) print 1; else print 2;",
    "while (x <= 10) x = x + 1;",
    "for (var i = 0; i < 3; i = i + 1) print i;",
    "for (;;) {}",
    "{ var a = 1; { print a; } }",
    "class A < B { fun m() { return this.v; } }",
    "class Point { fun init(x) { this.x = x; } }",
    "a.b.c = !d or e and -f;",
    "print (1 + 2) / (3 - 4);",
    "super.go(1, \"two\", nil, true, false);",
    "return;",
];

/// Separators that the scanner treats as trivia.
const SEPARATORS: &[&str] = &[" ", "\n", "\t", "\r\n", "  \n\n", " // note\n"];

/// Token sequences that do not parse.
const BROKEN: &[&[&str]] = &[
    &["var", "x", "=", "1", "print", "x", ";"],
    &["print", ";", "var", "=", "2", ";"],
    &["fun", "(", "a", ")", "{", "return", "a", "+", ";", "}"],
    &["class", "A", "<", "{", "}", "print", "1", "+", "2", ";"],
    &["x", "=", "1", "+", "(", "2", ";", "}"],
    &["if", "(", "a", ")", "{", "print", "a", ";"],
];

const GAP_PARTS: &[&str] = &[" ", "\t", "\n", "\r\n"];

fn program() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 1..6)
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SEPARATORS)
}

fn gap() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(GAP_PARTS), 1..4).prop_map(|parts| parts.concat())
}

fn broken_layout() -> impl Strategy<Value = (&'static [&'static str], Vec<String>)> {
    prop::sample::select(BROKEN)
        .prop_flat_map(|tokens| (Just(tokens), prop::collection::vec(gap(), tokens.len())))
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.iter().map(|d| d.message().to_string()).collect()
}

proptest! {
    #[test]
    fn parser_never_panics(input in "[ -~\n]{0,80}") {
        if let Err(errors) = parse("prop", &input) {
            prop_assert!(!errors.is_empty());
            for error in &errors {
                prop_assert!(error.to_string().starts_with("error: "));
            }
        }
    }

    #[test]
    fn layout_does_not_change_tree(fragments in program(), sep in separator()) {
        let compact = parse("prop", &fragments.join(" ")).unwrap();
        let spread = parse("prop", &fragments.join(sep)).unwrap();
        prop_assert_eq!(compact, spread);
    }

    #[test]
    fn layout_does_not_change_diagnostics((tokens, gaps) in broken_layout()) {
        let compact = parse("prop", &tokens.join(" ")).unwrap_err();
        let spread: String = gaps
            .iter()
            .zip(tokens)
            .map(|(gap, token)| format!("{gap}{token}"))
            .collect();
        let spread = parse("prop", &spread).unwrap_err();
        prop_assert_eq!(compact.len(), spread.len());
        prop_assert_eq!(messages(&compact), messages(&spread));
    }

    #[test]
    fn unparse_round_trips(fragments in program()) {
        let tree = parse("prop", &fragments.join("\n")).unwrap();
        let printed = unparse(&tree);
        let reparsed = parse("prop", &printed).unwrap();
        prop_assert_eq!(tree, reparsed);
    }

    #[test]
    fn single_bad_character_single_diagnostic(
        fragments in program(),
        cut in 0usize..6,
    ) {
        let cut = cut.min(fragments.len());
        let mut text = fragments[..cut].join(" ");
        text.push_str(" @ ");
        text.push_str(&fragments[cut..].join(" "));
        let errors = parse("prop", &text).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors.first().message(), "unrecognized token '@'");
    }

    #[test]
    fn token_positions_ordered(input in "[ -~\n]{0,80}") {
        let source = Arc::new(Source::new("prop", &input));
        if let Ok(tokens) = scan_all(&source) {
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].position.end < pair[1].position.start);
            }
            if let Some(last) = tokens.last() {
                prop_assert!(last.position.end < source.len());
            }
            for token in &tokens {
                prop_assert_eq!(token.position.len(), token.lexeme.chars().count());
            }
        }
    }

    #[test]
    fn parsing_is_deterministic(input in "[ -~\n]{0,80}") {
        let first = parse("prop", &input);
        let second = parse("prop", &input);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => {
                let a: Vec<String> = a.iter().map(ToString::to_string).collect();
                let b: Vec<String> = b.iter().map(ToString::to_string).collect();
                prop_assert_eq!(a, b);
            }
            _ => prop_assert!(false, "parse results differ"),
        }
    }
}
