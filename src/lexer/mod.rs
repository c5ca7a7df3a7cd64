pub mod lexer;
pub mod token;

pub use lexer::{LexError, Lexer};
pub use token::{PrintStyle, Token, TokenKind, TokenList};
