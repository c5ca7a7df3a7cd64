use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,           // command, argument or quoted text
    Pipe,           // |
    RedirectIn,     // <
    RedirectOut,    // >
    RedirectAppend, // >>
    Background,     // &
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,       // Token text with quotes and escapes removed
    pub span: (usize, usize), // Byte range in the source line [start, end)
}

impl Token {
    pub fn word(lexeme: impl Into<String>, span: (usize, usize)) -> Self {
        Token {
            kind: TokenKind::Word,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.lexeme
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrintStyle {
    #[default]
    Lines,
    Inline,
}

/// Ordered tokens of one input line, in source order.
///
/// An empty list is the value returned by [`TokenList::new`]; there is no
/// partially-built state. Dropping the list releases every token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn get(&self, idx: usize) -> Option<&Token> {
        self.tokens.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn lexemes(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::as_str)
    }

    pub fn print_list<W: Write>(&self, out: &mut W, style: PrintStyle) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        match style {
            PrintStyle::Lines => {
                for token in &self.tokens {
                    writeln!(out, "{}", token.lexeme)?;
                }
            }
            PrintStyle::Inline => writeln!(out, "{}", self)?,
        }
        Ok(())
    }

    /// Drops every token and leaves the list empty. Calling it again is a no-op.
    pub fn release(&mut self) {
        let released = std::mem::take(&mut self.tokens);
        tracing::trace!(count = released.len(), "releasing token list");
        drop(released);
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&token.lexeme)?;
        }
        Ok(())
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
