use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]*d[1-9][0-9]*")]
    Dice,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // roll modifier triggers
    #[token(">")]
    Successes,
    #[token("x")]
    Exploding,

    #[regex(r"[0-9]*d0[0-9]*")]
    ErrZeroSides,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Dice => "a dice literal",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Successes => "'>'",
            Self::Exploding => "'x'",
            Self::ErrZeroSides => "a dice literal",
            Self::Error => "end of input",
        }
    }
}
