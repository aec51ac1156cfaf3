pub mod ast;
mod lexer;
mod parser;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind, Parser};

pub fn parse(s: &str) -> Result<ast::Expression, ParseError> {
    Parser::new(s).parse()
}
