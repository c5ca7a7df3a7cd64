use thiserror::Error;

use crate::config::ConfigError;
use crate::io::ReadError;
use crate::lexer::LexError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Read error: {0}")]
    Read(#[from] ReadError),
    #[error("Lexing error: {0}")]
    Lex(#[from] LexError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Interpreter error: {0}")]
    Interpret(String),
}

impl ShellError {
    /// Fatal errors end the shell session; everything else discards the
    /// current line and re-prompts.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::Read(e) => e.is_fatal(),
            ShellError::Io(_) | ShellError::Config(_) => true,
            ShellError::Lex(_) | ShellError::Interpret(_) => false,
        }
    }
}
