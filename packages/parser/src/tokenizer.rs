//! Lexer for key-path strings using logos
//!
//! Grammar: `ident ( "[" index "]" ( "." ident )? )?`

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    // Overflowing indices fail the callback and surface as lexer errors
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<usize>().ok())]
    Index(usize),

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(".")]
    Dot,
}

/// A lexed token, or `None` for input the lexer could not match
pub type Spanned<'src> = (Option<Token<'src>>, Range<usize>);

pub fn tokenize(source: &str) -> Vec<Spanned<'_>> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| (token.ok(), span))
        .collect()
}
