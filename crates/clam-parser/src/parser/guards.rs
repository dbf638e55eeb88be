//! Parser guards to prevent stack overflow

use super::{ParseError, Parser};

/// Maximum nesting depth before rejecting parse
///
/// Each level of parenthesized expression costs around a dozen stack frames,
/// so this stays well inside a default test thread stack in debug builds.
pub const MAX_PARSE_DEPTH: usize = 64;

/// Run `parse` one nesting level deeper.
///
/// Fails with [`ParseErrorKind::NestingTooDeep`](super::ParseErrorKind::NestingTooDeep)
/// instead of recursing past [`MAX_PARSE_DEPTH`]. The depth is restored on
/// both success and failure.
pub fn nested<T>(
    parser: &mut Parser,
    context: &'static str,
    parse: impl FnOnce(&mut Parser) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    if parser.depth >= MAX_PARSE_DEPTH {
        let position = parser.current_position();
        return Err(ParseError::nesting_too_deep(MAX_PARSE_DEPTH, context, position));
    }
    parser.depth += 1;
    // Inner closure so `?` inside `parse` cannot skip the decrement
    let result = parse(parser);
    parser.depth -= 1;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;

    fn parser() -> Parser {
        Parser::from_text("test", "1").unwrap()
    }

    #[test]
    fn test_depth_restored() {
        let mut parser = parser();
        let result = nested(&mut parser, "test", |p| {
            assert_eq!(p.depth, 1);
            nested(p, "test", |p| {
                assert_eq!(p.depth, 2);
                Ok(())
            })
        });
        assert!(result.is_ok());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_depth_restored_on_error() {
        let mut parser = parser();
        let result: Result<(), ParseError> = nested(&mut parser, "test", |p| {
            Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                p.current_position(),
            ))
        });
        assert!(result.is_err());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_depth_limit() {
        let mut parser = parser();
        parser.depth = MAX_PARSE_DEPTH;
        let result = nested(&mut parser, "expression", |_| Ok(()));
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep { .. },
                ..
            })
        ));
        assert_eq!(parser.depth, MAX_PARSE_DEPTH);
    }
}
