use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;
use tracing::debug;

use super::token::{Token, TokenKind, TokenList};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LexError {
    #[error("Unterminated quote '{quote}' starting at position {pos}")]
    UnterminatedQuote { quote: char, pos: usize },
    #[error("Trailing backslash at position {pos}")]
    TrailingEscape { pos: usize },
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    buf: String,
    in_word: bool, // true once a word has started, even if `buf` is still empty ("")
    word_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
            buf: String::new(),
            in_word: false,
            word_start: 0,
        }
    }

    pub fn tokenize_line(line: &str) -> Result<TokenList, LexError> {
        Lexer::new(line).tokenize()
    }

    /// Splits the whole input into a [`TokenList`].
    ///
    /// On error the tokens gathered so far are dropped here; the caller never
    /// sees a partial list.
    pub fn tokenize(mut self) -> Result<TokenList, LexError> {
        let mut tokens = TokenList::new();

        while let Some((pos, ch)) = self.chars.next() {
            match ch {
                ' ' | '\t' => self.finish_word(&mut tokens, pos),
                '|' => {
                    self.finish_word(&mut tokens, pos);
                    tokens.push(operator(TokenKind::Pipe, "|", pos));
                }
                '<' => {
                    self.finish_word(&mut tokens, pos);
                    tokens.push(operator(TokenKind::RedirectIn, "<", pos));
                }
                '>' => {
                    self.finish_word(&mut tokens, pos);
                    if self.chars.next_if(|&(_, c)| c == '>').is_some() {
                        tokens.push(operator(TokenKind::RedirectAppend, ">>", pos));
                    } else {
                        tokens.push(operator(TokenKind::RedirectOut, ">", pos));
                    }
                }
                '&' => {
                    self.finish_word(&mut tokens, pos);
                    tokens.push(operator(TokenKind::Background, "&", pos));
                }
                '"' => {
                    self.start_word(pos);
                    self.double_quoted(pos)?;
                }
                '\'' => {
                    self.start_word(pos);
                    self.single_quoted(pos)?;
                }
                '\\' => {
                    self.start_word(pos);
                    match self.chars.next() {
                        Some((_, escaped)) => self.buf.push(escaped),
                        None => return Err(LexError::TrailingEscape { pos }),
                    }
                }
                _ => {
                    self.start_word(pos);
                    self.buf.push(ch);
                }
            }
        }
        self.finish_word(&mut tokens, self.input.len());

        debug!(count = tokens.len(), "tokenized line");
        Ok(tokens)
    }

    fn start_word(&mut self, pos: usize) {
        if !self.in_word {
            self.in_word = true;
            self.word_start = pos;
        }
    }

    fn finish_word(&mut self, tokens: &mut TokenList, end: usize) {
        if !self.in_word {
            return;
        }
        let lexeme = std::mem::take(&mut self.buf);
        tokens.push(Token::word(lexeme, (self.word_start, end)));
        self.in_word = false;
    }

    // Backslash escapes the next character inside double quotes too.
    fn double_quoted(&mut self, open: usize) -> Result<(), LexError> {
        let unterminated = LexError::UnterminatedQuote {
            quote: '"',
            pos: open,
        };
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(()),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => self.buf.push(escaped),
                    None => return Err(unterminated),
                },
                Some((_, c)) => self.buf.push(c),
                None => return Err(unterminated),
            }
        }
    }

    fn single_quoted(&mut self, open: usize) -> Result<(), LexError> {
        loop {
            match self.chars.next() {
                Some((_, '\'')) => return Ok(()),
                Some((_, c)) => self.buf.push(c),
                None => {
                    return Err(LexError::UnterminatedQuote {
                        quote: '\'',
                        pos: open,
                    });
                }
            }
        }
    }
}

fn operator(kind: TokenKind, lexeme: &str, pos: usize) -> Token {
    Token {
        kind,
        lexeme: lexeme.to_string(),
        span: (pos, pos + lexeme.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::PrintStyle;
    use proptest::prelude::*;

    fn token(kind: TokenKind, lexeme: &str, span: (usize, usize)) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            span,
        }
    }

    fn lexemes(input: &str) -> Vec<String> {
        Lexer::tokenize_line(input)
            .unwrap()
            .lexemes()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_tokenize_simple_words() {
        let tokens = Lexer::tokenize_line("echo hello world").unwrap();
        assert_eq!(
            tokens.iter().cloned().collect::<Vec<_>>(),
            vec![
                token(TokenKind::Word, "echo", (0, 4)),
                token(TokenKind::Word, "hello", (5, 10)),
                token(TokenKind::Word, "world", (11, 16)),
            ]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Lexer::tokenize_line("").unwrap().is_empty());
        assert!(Lexer::tokenize_line("   ").unwrap().is_empty());
        assert!(Lexer::tokenize_line(" \t \t").unwrap().is_empty());
    }

    #[test]
    fn test_matches_whitespace_split() {
        let lines = [
            "ls -la /tmp",
            "  leading and trailing  ",
            "tabs\tand\t\tspaces   mixed",
            "single",
            "cargo build --release --target x86_64-unknown-linux-gnu",
        ];
        for line in lines {
            let expected: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            assert_eq!(lexemes(line), expected, "line: {:?}", line);
        }
    }

    #[test]
    fn test_round_trip_normalizes_whitespace() {
        let line = "  git   commit  -m\tmessage ";
        let tokens = Lexer::tokenize_line(line).unwrap();
        assert_eq!(tokens.to_string(), "git commit -m message");
    }

    #[test]
    fn test_double_quoted_word() {
        assert_eq!(lexemes("echo \"hi there\" now"), vec!["echo", "hi there", "now"]);
    }

    #[test]
    fn test_quote_joins_adjacent_text() {
        let tokens = Lexer::tokenize_line("a\"b c\"d e").unwrap();
        assert_eq!(
            tokens.iter().cloned().collect::<Vec<_>>(),
            vec![
                token(TokenKind::Word, "ab cd", (0, 7)),
                token(TokenKind::Word, "e", (8, 9)),
            ]
        );
    }

    #[test]
    fn test_empty_quotes_make_empty_word() {
        assert_eq!(lexemes("echo \"\" x"), vec!["echo", "", "x"]);
        assert_eq!(lexemes("''"), vec![""]);
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(lexemes(r#"echo 'a\b "c"'"#), vec!["echo", r#"a\b "c""#]);
    }

    #[test]
    fn test_quoted_operator_is_word() {
        let tokens = Lexer::tokenize_line("echo \"|\" '>'").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Word));
        assert_eq!(tokens.lexemes().collect::<Vec<_>>(), vec!["echo", "|", ">"]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(lexemes(r"echo a\ b"), vec!["echo", "a b"]);
        assert_eq!(lexemes(r"echo \|"), vec!["echo", "|"]);
        assert_eq!(lexemes(r"echo \\"), vec!["echo", "\\"]);
        assert_eq!(lexemes(r#"echo "say \"hi\"""#), vec!["echo", "say \"hi\""]);
    }

    #[test]
    fn test_trailing_escape() {
        assert_eq!(
            Lexer::tokenize_line("echo foo\\"),
            Err(LexError::TrailingEscape { pos: 8 })
        );
    }

    #[test]
    fn test_unterminated_double_quote() {
        assert_eq!(
            Lexer::tokenize_line("echo \"unterminated"),
            Err(LexError::UnterminatedQuote { quote: '"', pos: 5 })
        );
        // backslash before end of line inside quotes is still an open quote
        assert_eq!(
            Lexer::tokenize_line("echo \"abc\\"),
            Err(LexError::UnterminatedQuote { quote: '"', pos: 5 })
        );
    }

    #[test]
    fn test_unterminated_single_quote() {
        assert_eq!(
            Lexer::tokenize_line("ls 'foo"),
            Err(LexError::UnterminatedQuote {
                quote: '\'',
                pos: 3
            })
        );
    }

    #[test]
    fn test_pipe() {
        assert_eq!(lexemes("ls | grep foo"), vec!["ls", "|", "grep", "foo"]);
        let tokens = Lexer::tokenize_line("ls|grep").unwrap();
        assert_eq!(
            tokens.iter().cloned().collect::<Vec<_>>(),
            vec![
                token(TokenKind::Word, "ls", (0, 2)),
                token(TokenKind::Pipe, "|", (2, 3)),
                token(TokenKind::Word, "grep", (3, 7)),
            ]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Lexer::tokenize_line("sort<in>out>>log&").unwrap();
        assert_eq!(
            tokens.iter().cloned().collect::<Vec<_>>(),
            vec![
                token(TokenKind::Word, "sort", (0, 4)),
                token(TokenKind::RedirectIn, "<", (4, 5)),
                token(TokenKind::Word, "in", (5, 7)),
                token(TokenKind::RedirectOut, ">", (7, 8)),
                token(TokenKind::Word, "out", (8, 11)),
                token(TokenKind::RedirectAppend, ">>", (11, 13)),
                token(TokenKind::Word, "log", (13, 16)),
                token(TokenKind::Background, "&", (16, 17)),
            ]
        );
    }

    #[test]
    fn test_repeated_operators_split() {
        assert_eq!(lexemes("a || b"), vec!["a", "|", "|", "b"]);
        assert_eq!(lexemes("a >>> b"), vec!["a", ">>", ">", "b"]);
    }

    #[test]
    fn test_multibyte_spans() {
        let tokens = Lexer::tokenize_line("echo héllo|wc").unwrap();
        assert_eq!(tokens.get(1), Some(&token(TokenKind::Word, "héllo", (5, 11))));
        assert_eq!(tokens.get(2), Some(&token(TokenKind::Pipe, "|", (11, 12))));
    }

    proptest! {
        #[test]
        fn plain_lines_split_like_whitespace(line in "[a-z0-9 \t-]{0,40}") {
            let expected: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            prop_assert_eq!(lexemes(&line), expected);
        }

        #[test]
        fn printed_tokens_rejoin_to_normalized_line(line in "[a-zA-Z0-9 \t./_-]{0,60}") {
            let tokens = Lexer::tokenize_line(&line).unwrap();
            let normalized = line.split_whitespace().collect::<Vec<_>>().join(" ");
            let mut out = Vec::new();
            tokens.print_list(&mut out, PrintStyle::Lines).unwrap();
            let printed = String::from_utf8(out).unwrap();
            prop_assert_eq!(printed.lines().collect::<Vec<_>>().join(" "), normalized);
        }

        #[test]
        fn whitespace_only_is_empty(line in "[ \t]{0,20}") {
            prop_assert!(Lexer::tokenize_line(&line).unwrap().is_empty());
        }

        #[test]
        fn any_line_tokenizes_without_panic(line in "\\PC{0,40}") {
            let _ = Lexer::tokenize_line(&line);
        }
    }
}
