use super::{ast::*, lexer::*};
use crate::common::*;
use crate::dice::DiceSpec;
use crate::ops::{DiceOperator, Exploding, Successes};
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;

type PResult<T = Node> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<TokenKind>,
    },
    UnexpectedString {
        expected: Vec<TokenKind>,
    },
    UnknownOperator,
    MissingOperand(char),
    ZeroSides,
    IntegerOverflow,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                match found {
                    Some(kind) => write!(f, "unexpected {}", kind.to_str())?,
                    None => write!(f, "unexpected end of input")?,
                }
                if expected.is_empty() {
                    Ok(())
                } else {
                    write!(f, ", expected ")?;
                    fmt_expected(expected, f)
                }
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnknownOperator => write!(f, "unrecognized roll modifier"),
            Self::MissingOperand(trigger) => {
                write!(f, "roll modifier '{}' is missing its operand", trigger)
            }
            Self::ZeroSides => write!(f, "dice cannot have zero sides"),
            Self::IntegerOverflow => write!(f, "number is too large"),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        f.write_str(expected[0].to_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0].to_str(), expected[1].to_str())
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp.to_str())?;
        }
        write!(f, "or {}", expected[len - 1].to_str())
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const MULTIPLICATION_OPS: &'static [TokenKind] = &[TokenKind::Star, TokenKind::Slash];

    const UNARY_PREFIX_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    pub fn new(s: &'a str) -> Self {
        Self { lexer: lexer(s) }
    }

    /// Parses the whole input. Dice mode is entered when the expression
    /// starts with a dice token; everything else is treated as a plain
    /// arithmetic expression.
    pub fn parse(mut self) -> Result<Expression, ParseError> {
        if self.matches(TokenKind::Dice) {
            self.parse_dice_expr().map(Expression::Roll)
        } else if self.matches(TokenKind::ErrZeroSides) {
            self.advance();
            self.error(ParseErrorKind::ZeroSides)
        } else {
            let node = self.parse_node()?;
            self.expect_end()?;
            Ok(Expression::Arithmetic(node))
        }
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn advance_as<T: std::str::FromStr>(&mut self) -> Option<T>
    where
        T::Err: std::fmt::Debug,
    {
        self.advance()?;
        Some(self.lexer.slice().parse().unwrap())
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    fn consume_as<T: std::str::FromStr>(
        &mut self,
        expected: TokenKind,
    ) -> PResult<Result<T, T::Err>> {
        self.consume(expected)?;
        Ok(self.lexer.slice().parse())
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        let found = self.lexer.next();
        if matches!(found, Some(TokenKind::ErrZeroSides)) {
            self.error(ParseErrorKind::ZeroSides)
        } else if matches!(found, Some(TokenKind::Error)) {
            self.error(ParseErrorKind::UnexpectedString { expected })
        } else {
            self.error(ParseErrorKind::UnexpectedToken { found, expected })
        }
    }

    fn expect_end(&mut self) -> PResult<()> {
        if self.lexer.peek().is_none() {
            Ok(())
        } else {
            self.unexpected_token(vec![])
        }
    }

    fn parse_dice_expr(&mut self) -> PResult<DiceExpr> {
        let spec = match self.consume_as::<DiceSpec>(TokenKind::Dice)? {
            Ok(spec) => spec,
            // the lexer guarantees shape, so only overflow can get here
            Err(_) => return self.error(ParseErrorKind::IntegerOverflow),
        };
        let ops = self.parse_ops()?;
        Ok(DiceExpr::new(spec, ops))
    }

    fn parse_ops(&mut self) -> PResult<Vec<DiceOperator>> {
        let mut ops = Vec::new();
        loop {
            match self.lexer.peek() {
                Some(TokenKind::Successes) => {
                    self.advance();
                    let threshold = self.parse_operand('>')?;
                    ops.push(Successes::new(threshold).into());
                }
                Some(TokenKind::Exploding) => {
                    self.advance();
                    let threshold = self.parse_operand('x')?;
                    ops.push(Exploding::new(threshold).into());
                }
                None => break,
                // anything else trailing a dice token is a modifier we
                // don't know about; reject it rather than skip it
                Some(_) => {
                    self.advance();
                    return self.error(ParseErrorKind::UnknownOperator);
                }
            }
        }
        Ok(ops)
    }

    fn parse_operand(&mut self, trigger: char) -> PResult<UInt> {
        if self.matches(TokenKind::Integer) {
            match self.consume_as::<UInt>(TokenKind::Integer)? {
                Ok(x) => Ok(x),
                Err(_) => self.error(ParseErrorKind::IntegerOverflow),
            }
        } else {
            self.error(ParseErrorKind::MissingOperand(trigger))
        }
    }

    fn parse_node(&mut self) -> PResult {
        self.parse_addition()
    }

    fn parse_addition(&mut self) -> PResult {
        let mut lhs = self.parse_multiplication()?;

        while self.matches_any(Self::ADDITION_OPS) {
            let op = self.advance_as().unwrap();
            let rhs = self.parse_multiplication()?;

            lhs = Node::new_binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_multiplication(&mut self) -> PResult {
        let mut lhs = self.parse_unary_prefix()?;

        while self.matches_any(Self::MULTIPLICATION_OPS) {
            let op = self.advance_as().unwrap();
            let rhs = self.parse_unary_prefix()?;

            lhs = Node::new_binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_unary_prefix(&mut self) -> PResult {
        if self.matches_any(Self::UNARY_PREFIX_OPS) {
            let op = self.advance_as().unwrap();
            let rhs = self.parse_unary_prefix()?;

            Ok(Node::new_unary(op, rhs))
        } else {
            self.parse_atom()
        }
    }

    fn parse_atom(&mut self) -> PResult {
        match self.lexer.peek() {
            Some(TokenKind::LeftParen) => {
                self.advance();
                let inner = self.parse_node()?;
                self.consume(TokenKind::RightParen)?;
                Ok(Node::new_parenthetical(inner))
            }
            Some(TokenKind::Integer) => self.parse_integer(),
            _ => self.unexpected_token(vec![TokenKind::LeftParen, TokenKind::Integer]),
        }
    }

    fn parse_integer(&mut self) -> PResult {
        match self.consume_as::<Int>(TokenKind::Integer)? {
            Ok(x) => Ok(Node::new_literal(x)),
            Err(_) => self.error(ParseErrorKind::IntegerOverflow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn spec(quantity: UInt, sides: UInt) -> DiceSpec {
        DiceSpec::new(quantity, NonZeroUInt::new(sides).unwrap())
    }

    fn roll(quantity: UInt, sides: UInt, ops: Vec<DiceOperator>) -> Expression {
        Expression::Roll(DiceExpr::new(spec(quantity, sides), ops))
    }

    fn kind_of(s: &str) -> ParseErrorKind {
        parse(s).unwrap_err().kind
    }

    #[test]
    fn test_parse_plain_dice() {
        assert_eq!(parse("2d6").unwrap(), roll(2, 6, vec![]));
        assert_eq!(parse("d6").unwrap(), roll(1, 6, vec![]));
        assert_eq!(parse("0d6").unwrap(), roll(0, 6, vec![]));
    }

    #[test]
    fn test_parse_dice_with_ops() {
        assert_eq!(
            parse("4d10>6").unwrap(),
            roll(4, 10, vec![Successes::new(6).into()])
        );
        assert_eq!(
            parse("3d6x6").unwrap(),
            roll(3, 6, vec![Exploding::new(6).into()])
        );
        assert_eq!(
            parse("4d10>6x10").unwrap(),
            roll(4, 10, vec![Successes::new(6).into(), Exploding::new(10).into()])
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        for s in ["2d6", "4d10>6x10", "(2+3)*4"] {
            assert_eq!(parse(s).unwrap(), parse(s).unwrap());
        }
    }

    #[test]
    fn test_parse_arithmetic() {
        use BinaryOperator::*;
        assert_eq!(
            parse("1+2").unwrap(),
            Expression::Arithmetic(Node::new_binary(
                Add,
                Node::new_literal(1),
                Node::new_literal(2)
            ))
        );
        assert_eq!(
            parse("(2+3)*4").unwrap(),
            Expression::Arithmetic(Node::new_binary(
                Mul,
                Node::new_parenthetical(Node::new_binary(
                    Add,
                    Node::new_literal(2),
                    Node::new_literal(3)
                )),
                Node::new_literal(4)
            ))
        );
    }

    #[test]
    fn test_parse_precedence() {
        use BinaryOperator::*;
        // 1 + 2 * 3 groups as 1 + (2 * 3)
        assert_eq!(
            parse("1+2*3").unwrap(),
            Expression::Arithmetic(Node::new_binary(
                Add,
                Node::new_literal(1),
                Node::new_binary(Mul, Node::new_literal(2), Node::new_literal(3))
            ))
        );
    }

    #[test]
    fn test_parse_unary() {
        use UnaryOperator::*;
        assert_eq!(
            parse("-2").unwrap(),
            Expression::Arithmetic(Node::new_unary(Neg, Node::new_literal(2)))
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(kind_of("4d10>"), ParseErrorKind::MissingOperand('>'));
        assert_eq!(kind_of("3d6x"), ParseErrorKind::MissingOperand('x'));
        assert_eq!(kind_of("4d10>x6"), ParseErrorKind::MissingOperand('>'));
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(kind_of("2d6k3"), ParseErrorKind::UnknownOperator);
        assert_eq!(kind_of("2d6+1"), ParseErrorKind::UnknownOperator);
    }

    #[test]
    fn test_zero_sides() {
        assert_eq!(kind_of("2d0"), ParseErrorKind::ZeroSides);
    }

    #[test]
    fn test_arithmetic_errors() {
        assert!(matches!(
            kind_of("(2+3"),
            ParseErrorKind::UnexpectedToken { found: None, .. }
        ));
        assert!(matches!(kind_of("2+"), ParseErrorKind::UnexpectedToken { .. }));
        assert!(matches!(kind_of("$"), ParseErrorKind::UnexpectedString { .. }));
        // dice tokens are only legal at the start of the expression
        assert!(matches!(
            kind_of("1+2d6"),
            ParseErrorKind::UnexpectedToken {
                found: Some(TokenKind::Dice),
                ..
            }
        ));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(parse("1 2").is_err());
        assert!(parse("(1))").is_err());
    }
}
