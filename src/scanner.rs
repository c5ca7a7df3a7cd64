//! The scanner's entry points for an interpreter loop.
//!
//! `read_input_line` and `get_token_list` hand owned values to the caller.
//! A list is released when its owner drops it; `free_token_list` does the
//! same explicitly and takes the list by value, so a freed list can not be
//! used or freed again.

use std::io;

use crate::io::{LineRead, LineReader, ReadError};
use crate::lexer::{LexError, Lexer, PrintStyle, TokenList};

pub fn read_input_line() -> Result<LineRead, ReadError> {
    LineReader::stdin().read_line()
}

pub fn get_token_list(line: &str) -> Result<TokenList, LexError> {
    Lexer::tokenize_line(line)
}

pub fn is_empty(list: &TokenList) -> bool {
    list.is_empty()
}

pub fn print_list(list: &TokenList) -> io::Result<()> {
    list.print_list(&mut io::stdout().lock(), PrintStyle::Lines)
}

pub fn free_token_list(mut list: TokenList) {
    list.release();
}
